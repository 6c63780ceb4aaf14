use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` always wins; otherwise `verbose` forces debug output and
/// `log_level` (from `LOG_LEVEL` or the config file) sets the crate level.
/// `json` switches to newline-delimited JSON output for container log
/// collectors; the compact format is for interactive use.
pub fn init_logger(verbose: bool, json: bool, log_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, log_level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .init();
    }
}

fn default_directives(verbose: bool, log_level: Option<&str>) -> String {
    if verbose {
        "github_telegram_notifier=debug,info".to_string()
    } else if let Some(level) = log_level {
        format!("github_telegram_notifier={},info", level.to_lowercase())
    } else {
        "github_telegram_notifier=info".to_string()
    }
}
