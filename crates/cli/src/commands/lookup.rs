use std::sync::Arc;

use certify_core::config::CertifyConfig;
use certify_core::lookup::{CertificateLookup, GridSource, LookupState};
use certify_core::models::query::Query;
use certify_core::models::record::ResolvedRecord;
use certify_sheets::client::SheetsClient;

const NOT_FOUND_MESSAGE: &str = "Certificate details Not Found";

/// Run the `lookup` command: resolve one certificate and print it.
pub async fn run(config_path: &str, id: &str, sheet: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let client = SheetsClient::from_config(&config.source)?;
    let output = lookup_with(&config, Arc::new(client), id, sheet, json).await?;
    println!("{output}");
    Ok(())
}

/// Resolve `id` against `source` and format the result.
pub async fn lookup_with(
    config: &CertifyConfig,
    source: Arc<dyn GridSource>,
    id: &str,
    sheet: Option<String>,
    json: bool,
) -> anyhow::Result<String> {
    let lookup = CertificateLookup::new(source, config.sheets.clone());
    let query = Query::from_params(Some(id.to_string()), sheet);

    match lookup.run(&query).await {
        LookupState::Resolved { sheet, record } if json => Ok(serde_json::to_string_pretty(
            &serde_json::json!({ "sheet": sheet, "record": record }),
        )?),
        LookupState::Resolved { sheet, record } => {
            let order = config
                .sheets
                .get(&sheet)
                .map(|m| m.field_order.clone())
                .unwrap_or_default();
            Ok(format_record(&record, &order))
        }
        _ => anyhow::bail!(NOT_FOUND_MESSAGE),
    }
}

/// One `field: value` line per non-empty field, in `field_order`.
fn format_record(record: &ResolvedRecord, field_order: &[String]) -> String {
    let width = field_order.iter().map(|f| f.len()).max().unwrap_or(0);
    field_order
        .iter()
        .filter_map(|field| {
            record
                .non_empty(field)
                .map(|value| format!("{:<width$}  {}", format!("{field}:"), value, width = width + 1))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
