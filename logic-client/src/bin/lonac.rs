use logic_client::cli::Processor;
use logic_client::config::Config;
use logic_client::write_output;

fn main() -> anyhow::Result<()> {
    let config = Config::new()?;

    stderrlog::new()
        .quiet(config.is_quiet())
        .verbosity(config.verbosity())
        .init()?;

    let mut proc = Processor::new(&config);
    let output = proc.run(&config)?;

    if let Some(path) = config.output() {
        log::info!("writing output to {}", path.display());
    }
    write_output(config.output(), &output.text)?;

    Ok(())
}
