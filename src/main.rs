use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use trident::Provider;
use trident::core::config;

#[derive(Parser)]
#[command(name = "trident", about = "Local AI model chat interface")]
struct Args {
    /// Reply provider to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to trident.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("trident.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    let resolved = config::resolve(&file_config, args.provider.as_ref().map(|p| p.as_str()));

    log::info!("Trident starting up with provider: {}", resolved.provider);

    trident::tui::run(resolved)
}
