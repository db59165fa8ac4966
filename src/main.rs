use clap::Parser;
use slabkit::cli::Cli;
use slabkit::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    tracing::debug!(version = slabkit::VERSION, build = slabkit::BUILD_DATE, "starting");
    let stdout = std::io::stdout();
    cli.execute(&mut stdout.lock())
}
