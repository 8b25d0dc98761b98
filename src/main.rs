use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use copyforge::api::PipelineClient;
use copyforge::app::App;
use copyforge::config::Config;
use copyforge::identity::{IdentityProvider, StoredProfileProvider};
use copyforge::logging;

#[derive(Parser)]
#[command(name = "copyforge")]
#[command(about = "Terminal wizard for AI-assisted SEO content generation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a display name
    Login {
        /// Display name to store in the profile
        name: String,
    },

    /// Remove the stored profile
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Probe the generation backend
    Health,

    /// Show backend usage statistics and recent activity
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Login { name }) => {
            cmd_login(&config, &name).await?;
        }
        Some(Commands::Logout) => {
            cmd_logout(&config).await?;
        }
        Some(Commands::Whoami) => {
            cmd_whoami(&config);
        }
        Some(Commands::Health) => {
            cmd_health(&config).await?;
        }
        Some(Commands::Dashboard) => {
            cmd_dashboard(&config).await?;
        }
        None => {
            // No subcommand = launch the wizard
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    result
}

fn pipeline_client(config: &Config) -> Result<PipelineClient> {
    Ok(
        PipelineClient::new(config.api.base_url.clone(), config.request_timeout())?
            .with_content_type(config.api.content_type.clone())
            .with_tone(config.api.tone.clone()),
    )
}

async fn cmd_login(config: &Config, name: &str) -> Result<()> {
    let provider = StoredProfileProvider::new(config.profile_path());
    let identity = provider.sign_in(name).await?;
    println!(
        "Signed in as {} ({})",
        identity.display_name, identity.account_id
    );
    Ok(())
}

async fn cmd_logout(config: &Config) -> Result<()> {
    let provider = StoredProfileProvider::new(config.profile_path());
    match provider.current() {
        Some(identity) => {
            provider.sign_out().await?;
            println!("Signed out {}", identity.display_name);
        }
        None => println!("No profile stored"),
    }
    Ok(())
}

fn cmd_whoami(config: &Config) {
    let provider = StoredProfileProvider::new(config.profile_path());
    match provider.current() {
        Some(identity) => {
            println!("{}", identity.display_name);
            println!("Account: {}", identity.account_id);
            println!("Profile: {}", provider.path().display());
        }
        None => {
            println!("Not signed in (run 'copyforge login <name>')");
        }
    }
}

async fn cmd_health(config: &Config) -> Result<()> {
    let client = pipeline_client(config)?;
    let health = client.health().await?;

    if health.is_ok() {
        println!("Backend OK at {}", config.api.base_url);
        if !health.time.is_empty() {
            println!("Server time: {}", health.time);
        }
    } else {
        println!("Backend reported status '{}'", health.status);
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_dashboard(config: &Config) -> Result<()> {
    let client = pipeline_client(config)?;
    let summary = client.dashboard().await?;

    println!("Pipeline Dashboard");
    println!("{}", "─".repeat(60));
    println!("Sessions:      {}", summary.stats.sessions);
    println!("Contents:      {}", summary.stats.contents);
    println!("Average score: {:.1}%", summary.stats.avg_score);

    if !summary.recent_sessions.is_empty() {
        println!();
        println!("Recent keyword sessions");
        println!("{}", "─".repeat(60));
        for session in &summary.recent_sessions {
            println!(
                "{}  \"{}\" ({} keywords)",
                session.time,
                session.seed,
                session.keywords.len()
            );
        }
    }

    if !summary.recent_contents.is_empty() {
        println!();
        println!("Recent contents");
        println!("{}", "─".repeat(60));
        for content in &summary.recent_contents {
            println!(
                "{}  [{}] {} ({}%, {} words)",
                content.time, content.content_type, content.title, content.seo_score, content.words
            );
        }
    }

    Ok(())
}
