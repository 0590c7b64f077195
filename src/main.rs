mod app;
mod cache;
mod catalog;
mod config;
mod event;
mod logging;
mod oneshot;
mod scan;
mod source;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skuscan")]
#[command(about = "Look up store items by scanned or typed SKU/UPC")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/skuscan/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Look up a single code, print the item and exit
  #[arg(long, value_name = "CODE")]
  code: Option<String>,

  /// Serve the cached item list without contacting the endpoint
  #[arg(long)]
  offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let _log_guard = logging::init(&config::Config::data_dir()?, &config.log.level)?;
  tracing::info!(source = %config.source.url, offline = args.offline, "Starting skuscan");

  let mut lookup = app::build_lookup(&config, args.offline)?;

  if let Some(code) = args.code {
    for line in oneshot::lookup_once(&mut lookup, &code, &config.display).await? {
      println!("{}", line);
    }
    return Ok(());
  }

  let mut app = app::App::new(lookup, &config);
  app.run().await?;

  Ok(())
}
