use anyhow::Context;
use clap::Parser;
use phub_logger::{LevelFilter, Logger};
use phub_quote::{Quote, QuoteArgs, load_shipping_config};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let args = QuoteArgs::parse();
    let config = load_shipping_config(&args)?;

    let logging = &config.logging;
    let level = logging.level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(level)
        .targets(logging.targets);
    let builder = match &logging.filter {
        Some(filter) => builder.env_filter(filter.as_str()),
        None => builder,
    };
    let _log = match &logging.path {
        Some(path) if logging.json => builder.path(path).json().init()?,
        Some(path) => builder.path(path).init()?,
        None => builder.init()?,
    };

    let quote = Quote::new(config, &args)?;
    let report = quote.run(&args)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to write report")?;
    writeln!(stdout)?;
    Ok(())
}
