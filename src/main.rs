use clap::Parser;
use tokendash::{
    cli::Cli,
    logger::{self, LogTag},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs directory must exist before the logger opens its file
    if let Err(e) = tokendash::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init(cli.logging.logger_config());
    logger::debug(
        LogTag::System,
        &format!("tokendash {} starting", env!("CARGO_PKG_VERSION")),
    );

    let debug_keys: Vec<&str> = LogTag::ALL
        .iter()
        .filter(|tag| cli.logging.debug_enabled(**tag))
        .map(|tag| tag.to_debug_key())
        .collect();
    if !debug_keys.is_empty() {
        logger::info(
            LogTag::System,
            &format!("Debug output enabled for: {}", debug_keys.join(", ")),
        );
    }

    let code = match tokendash::run::run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            logger::error(LogTag::System, &format!("{:#}", e));
            1
        }
    };

    logger::flush();
    std::process::exit(code);
}
