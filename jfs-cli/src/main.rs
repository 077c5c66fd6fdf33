//! JFS CLI - explore BASE fatality and accident log statistics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "jfs-cli",
    version,
    about = "Jump fatality statistics toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: jfs_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[JFS] cli: starting");
    let stdout = std::io::stdout();
    jfs_cmd::run(cli.command, &mut stdout.lock())
}
