use clap::Parser;
use labelkit::cli::Cli;
use labelkit::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    tracing::debug!("LabelKit {} starting", labelkit::VERSION);
    cli.run()
}
