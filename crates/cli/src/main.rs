use stockpile_cli::{AppConfig, demo};

fn main() -> anyhow::Result<()> {
    let (config, warnings) = AppConfig::from_env();
    stockpile_observability::init(&config.logging)?;
    for warning in &warnings {
        warning.emit();
    }

    tracing::info!("using inventory file {}", config.data_path.display());

    let mut stdout = std::io::stdout().lock();
    demo::run(&config, &mut stdout)
}
