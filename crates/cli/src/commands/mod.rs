pub mod init;
pub mod lookup;
pub mod serve;

use std::path::Path;

use certify_core::config::CertifyConfig;

/// Load, override from the environment, and validate the configuration file.
pub fn load_config(config_path: &str) -> anyhow::Result<CertifyConfig> {
    let mut config = CertifyConfig::load(Path::new(config_path))?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
