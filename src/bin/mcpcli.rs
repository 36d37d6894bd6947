use clap::Parser;
use mcpcli::cli::{run_cli, Cli};
use mcpcli::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if let Some(level) = cli.log_level() {
        log_config = log_config.with_level(level);
    }
    // Flushes buffered log lines on exit in async mode.
    let _guard = init_logging_with_config(&log_config)?;

    run_cli(&cli)
}
