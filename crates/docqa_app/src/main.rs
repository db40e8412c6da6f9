use docqa_app::platform::{self, AppConfig};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    platform::logging::initialize(config.log, config.log_dir());
    platform::run_app(config)
}
