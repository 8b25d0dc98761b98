//! copyforge - Terminal wizard for AI-assisted SEO content generation
//!
//! The binary drives a step-by-step wizard over a remote generation
//! backend; this library exposes the pieces for integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod export;
pub mod identity;
pub mod logging;
pub mod ui;
pub mod workflow;
