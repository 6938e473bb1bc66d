fn main() -> anyhow::Result<()> {
    zenobridge::cli::run_cli()
}
