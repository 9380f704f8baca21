//! TOML-based configuration system for certify.

use crate::error::{CertifyError, Result};
use crate::models::mapping::{MappingTable, ID_FIELD};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable that overrides `source.spreadsheet_id`.
pub const ENV_SPREADSHEET_ID: &str = "CERTIFY_SPREADSHEET_ID";
/// Environment variable that overrides `source.api_key`.
pub const ENV_API_KEY: &str = "CERTIFY_API_KEY";

/// Top-level certify configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertifyConfig {
    pub certify: CertifySection,
    pub source: SourceConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
    #[serde(default)]
    pub sheets: MappingTable,
}

/// Core instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertifySection {
    pub instance_name: String,
}

/// The spreadsheet every lookup reads from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    /// Request deadline. Unset means requests run to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".into()
}

/// Logo, brand name and footer links shown around every certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    /// Brand name words, rendered side by side next to the logo.
    #[serde(default = "default_brand")]
    pub brand: Vec<String>,
    #[serde(default = "default_logo")]
    pub logo: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Directory served under `/assets`, relative to the working directory.
    /// The default logo lives here. Set to `""` to serve nothing.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: Option<String>,
    #[serde(default = "default_social_links")]
    pub social_links: Vec<SocialLink>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            logo: default_logo(),
            site_url: default_site_url(),
            assets_dir: default_assets_dir(),
            social_links: default_social_links(),
        }
    }
}

fn default_brand() -> Vec<String> {
    vec!["Ava".into(), "Intern".into()]
}

fn default_logo() -> String {
    "/assets/logo.jpg".into()
}

fn default_assets_dir() -> Option<String> {
    Some("assets".into())
}

fn default_site_url() -> String {
    "https://www.avaintern.com".into()
}

fn default_social_links() -> Vec<SocialLink> {
    vec![
        SocialLink::new("linkedin", "https://www.linkedin.com/company/ava-intern"),
        SocialLink::new("youtube", "https://www.youtube.com/@AvaInternEdutechPvt.Ltd."),
        SocialLink::new("instagram", "https://www.instagram.com"),
    ]
}

/// A footer link. `name` selects the icon and CSS class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl CertifyConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CertifyError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Replace source credentials with values from `var`, when present and non-empty.
    ///
    /// `var` is usually `|k| std::env::var(k).ok()`; it is read once, at startup.
    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = var(ENV_SPREADSHEET_ID).filter(|v| !v.is_empty()) {
            self.source.spreadsheet_id = id;
        }
        if let Some(key) = var(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.source.api_key = key;
        }
    }

    /// Validate the configuration, returning an error for missing required fields.
    pub fn validate(&self) -> Result<()> {
        if self.certify.instance_name.is_empty() {
            return Err(CertifyError::Config(
                "certify.instance_name must not be empty".into(),
            ));
        }

        if self.source.spreadsheet_id.is_empty() {
            return Err(CertifyError::Config(
                "source.spreadsheet_id must not be empty".into(),
            ));
        }
        if self.source.api_key.is_empty() {
            return Err(CertifyError::Config(
                "source.api_key must not be empty".into(),
            ));
        }
        if self.source.base_url.is_empty() {
            return Err(CertifyError::Config(
                "source.base_url must not be empty".into(),
            ));
        }
        if self.source.timeout_secs == Some(0) {
            return Err(CertifyError::Config(
                "source.timeout_secs must be greater than zero".into(),
            ));
        }

        if self.sheets.is_empty() {
            return Err(CertifyError::Config(
                "at least one [[sheets]] entry is required".into(),
            ));
        }

        let mut names = HashSet::new();
        for sheet in self.sheets.iter() {
            if sheet.name.is_empty() {
                return Err(CertifyError::Config("sheets.name must not be empty".into()));
            }
            if !names.insert(sheet.name.as_str()) {
                return Err(CertifyError::Config(format!(
                    "duplicate sheet name: {}",
                    sheet.name
                )));
            }

            let mut fields = HashSet::new();
            for column in &sheet.columns {
                if column.field.is_empty() {
                    return Err(CertifyError::Config(format!(
                        "sheet {}: column field must not be empty",
                        sheet.name
                    )));
                }
                if column.label.is_empty() {
                    return Err(CertifyError::Config(format!(
                        "sheet {}: column label for {} must not be empty",
                        sheet.name, column.field
                    )));
                }
                if !fields.insert(column.field.as_str()) {
                    return Err(CertifyError::Config(format!(
                        "sheet {}: duplicate field {}",
                        sheet.name, column.field
                    )));
                }
            }

            if sheet.id_label().is_none() {
                return Err(CertifyError::Config(format!(
                    "sheet {} must bind the {ID_FIELD} field",
                    sheet.name
                )));
            }
        }

        Ok(())
    }

    /// Generate the shipped default configuration with placeholder credentials.
    pub fn generate_default() -> Self {
        Self {
            certify: CertifySection {
                instance_name: "Ava Intern".into(),
            },
            source: SourceConfig {
                spreadsheet_id: "your-spreadsheet-id".into(),
                api_key: "your-api-key".into(),
                base_url: default_sheets_base_url(),
                timeout_secs: None,
            },
            branding: BrandingConfig::default(),
            sheets: MappingTable::shipped(),
        }
    }
}
