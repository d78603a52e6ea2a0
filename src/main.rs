use std::process;

use labeltok::cli::Cli;
use labeltok::{LabelError, Pipeline};
use tracing_subscriber::{filter::LevelFilter, fmt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: &Cli) -> Result<(), LabelError> {
    let config = cli.resolve_config()?;
    let summary = Pipeline::new(config).run()?;
    println!("{} records -> {}", summary.records, summary.output.display());
    Ok(())
}
