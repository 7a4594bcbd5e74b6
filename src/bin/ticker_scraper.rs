use anyhow::Result;
use binance_scraper::bin_common::{
    load_config_from_env, parse_args, BinaryRunner, ConfigType, RunConfig,
};
use std::process::ExitCode;
use tickers::{init_logging_with_level, FatalError, ScraperApp, ScraperConfig};
use tracing::error;

struct TickerScraper {
    app: ScraperApp,
    run_config: RunConfig,
}

impl BinaryRunner for TickerScraper {
    async fn run(&mut self) -> Result<()> {
        match self.app.run().await {
            Ok(never) => match never {},
            Err(fatal) => Err(fatal.into()),
        }
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Optional first argument overrides the config path
    let config_path = match parse_args().into_iter().next() {
        Some(path) => load_config_from_env(ConfigType::Custom(path)),
        None => load_config_from_env(ConfigType::Scraper),
    };

    // Logging is not up yet, config errors go to stderr
    let config = match ScraperConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            let fatal = FatalError::from(e);
            eprintln!("[{}] {}", fatal.tag(), fatal);
            return ExitCode::from(fatal.exit_code());
        }
    };

    init_logging_with_level(&config.log_level);
    config.log();

    let run_config = RunConfig::new("Binance Ticker Scraper")
        .with_detail("Symbols", &config.symbols)
        .with_detail("Provider", &config.client.base_url)
        .with_detail("Timestamp encoding", format!("{:?}", config.timestamp_encoding));

    let app = match ScraperApp::new(config).await {
        Ok(app) => app,
        Err(fatal) => {
            error!("[{}] {}", fatal.tag(), fatal);
            return ExitCode::from(fatal.exit_code());
        }
    };

    let mut scraper = TickerScraper { app, run_config };

    match scraper.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(
            e.downcast_ref::<FatalError>()
                .map(FatalError::exit_code)
                .unwrap_or(1),
        ),
    }
}
