//! Per-step body rendering for the wizard

mod keywords;
mod result;
mod seed;
mod titles;
mod topics;
