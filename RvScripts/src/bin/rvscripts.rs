//! `rvscripts` command-line entry point

fn main() -> anyhow::Result<()> {
    rvscripts::cli::run_cli()
}
