use clap::Parser;
use cmd::Cmd;

mod cmd;

/// Offline tooling for the direct token offering contract.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    args.cmd.exec()
}
