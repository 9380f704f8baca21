use std::path::Path;

use certify_core::config::CertifyConfig;
use tracing::info;

/// Run the `init` command: write the default configuration file.
pub async fn run(config_path: &str, force: bool) -> anyhow::Result<()> {
    let path = Path::new(config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created directory: {}", parent.display());
        }
    }

    let config = CertifyConfig::generate_default();
    let toml_str = toml::to_string_pretty(&config)?;
    std::fs::write(path, &toml_str)?;
    info!("Wrote configuration to {}", path.display());

    println!("certify initialized successfully!");
    println!("  Configuration: {}", path.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set source.spreadsheet_id and source.api_key in {} (or CERTIFY_SPREADSHEET_ID / CERTIFY_API_KEY)",
        path.display()
    );
    println!("  2. Adjust [[sheets]] column labels to match your spreadsheet headers");
    println!(
        "  3. Put logo.jpg in {}/ (relative to where `certify serve` runs)",
        config.branding.assets_dir.as_deref().unwrap_or("assets")
    );
    println!("  4. Run `certify lookup --id <ID>` to test a lookup");
    println!("  5. Run `certify serve` to start the verification page");

    Ok(())
}
