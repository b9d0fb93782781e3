use clap::Parser;

use oc_cli::bootstrap::init_tracing_subscriber;
use oc_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Must run before anything logs; the file guard lives for the whole process.
    if let Err(err) = init_tracing_subscriber(cli.verbose) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    oc_cli::run(cli).await
}
