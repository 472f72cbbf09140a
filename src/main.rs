use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use frame_lock::{
   Error, Result,
   cmd::{self, fix::FixOptions},
   config::{Config, Overrides},
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the frame-lock application
#[derive(Parser)]
#[command(name = "frame-lock")]
#[command(about = "Lock image elements on a stored design frame")]
#[command(version)]
struct Cli {
   #[arg(long, global = true, env = "FRAME_LOCK_CONFIG", help = "Path to a TOML config file")]
   config: Option<PathBuf>,

   #[arg(long, global = true, help = "Supabase project URL")]
   url: Option<String>,

   #[arg(long, global = true, help = "Supabase API key")]
   api_key: Option<String>,

   #[command(subcommand)]
   command: Option<Cmd>,
}

/// Available subcommands for frame-lock
#[derive(Subcommand)]
enum Cmd {
   #[command(about = "Set isLocked on every unlocked image element of a frame")]
   Fix {
      #[arg(help = "Frame id (default: FRAME_LOCK_FRAME_ID)")]
      frame_id: Option<String>,

      #[arg(long, help = "Report what would change without writing")]
      dry_run: bool,

      #[arg(long, help = "JSON output")]
      json: bool,
   },

   #[command(about = "Check that the store answers with the configured key")]
   Ping,
}

#[tokio::main]
async fn main() {
   tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
      .with_writer(std::io::stderr)
      .init();

   let cli = Cli::parse();
   if let Err(err) = run(cli).await {
      if !matches!(err, Error::Reported { .. }) {
         eprintln!("{} {err}", style("✗").red());
      }
      std::process::exit(err.exit_code());
   }
}

async fn run(cli: Cli) -> Result<()> {
   let config = Config::load(cli.config.as_deref())?;
   let overrides = Overrides {
      supabase_url: cli.url,
      supabase_key: cli.api_key,
      frame_id:     None,
   };

   match cli.command {
      Some(Cmd::Fix { frame_id, dry_run, json }) => {
         let config = config.with_overrides(Overrides { frame_id, ..overrides });
         cmd::fix::execute(&config, FixOptions { dry_run, json }).await
      },
      Some(Cmd::Ping) => cmd::ping::execute(&config.with_overrides(overrides)).await,
      None => {
         cmd::fix::execute(&config.with_overrides(overrides), FixOptions::default()).await
      },
   }
}
