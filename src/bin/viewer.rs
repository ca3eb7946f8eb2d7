use fractal_viewer::{RunGuiCommand, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    RunGuiCommand::new(ViewerConfig::default()).execute()?;

    Ok(())
}
