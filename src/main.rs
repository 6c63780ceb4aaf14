use clap::Parser;
use github_telegram_notifier::domain::ports::ConfigProvider;
use github_telegram_notifier::utils::error::ErrorSeverity;
use github_telegram_notifier::utils::{logger, validation::Validate};
use github_telegram_notifier::{
    CliConfig, JsonFileStore, NotifierEngine, NotifierFileConfig, NotifyPipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();
    let once = cli.once;

    if let Some(path) = cli.config.clone() {
        let config = match NotifierFileConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        };

        let level = cli
            .log_level
            .clone()
            .or_else(|| config.log_level().map(str::to_string));
        logger::init_logger(
            cli.verbose,
            cli.log_json || config.json_logs(),
            level.as_deref(),
        );
        tracing::info!("Starting GitHub Telegram Notifier");
        tracing::info!("Loaded configuration from: {}", path);

        run(config, once).await;
    } else {
        logger::init_logger(cli.verbose, cli.log_json, cli.log_level.as_deref());
        tracing::info!("Starting GitHub Telegram Notifier");

        run(cli, once).await;
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate + 'static>(config: C, once: bool) {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let interval = config.poll_interval();
    tracing::info!(
        "Polling every {}s, state file: {}",
        interval.as_secs(),
        config.state_file()
    );

    let store = JsonFileStore::new(config.state_file());
    let pipeline = NotifyPipeline::new(store, config);
    let engine = NotifierEngine::new(pipeline);

    if once {
        match engine.run_once().await {
            Ok(summary) => {
                tracing::info!(
                    "✅ Poll cycle completed, {} message(s) delivered",
                    summary.delivered
                );
            }
            Err(e) => {
                tracing::error!("❌ Poll cycle failed: {}", e);
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());

                let exit_code = match e.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
    } else if let Err(e) = engine.run(interval).await {
        tracing::error!("❌ Notifier stopped with error: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("GitHub Telegram Notifier finished successfully");
}
