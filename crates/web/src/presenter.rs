//! Certificate page rendering: loading, not-found and the field table.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use certify_core::config::CertifyConfig;
use certify_core::lookup::LookupState;
use certify_core::models::mapping::MappingTable;
use certify_core::models::record::ResolvedRecord;
use tracing::{error, warn};

use crate::qr;

const LOADING_MESSAGE: &str = "Fetching Certificate details...";

/// Field order for sheets that do not configure one.
const DEFAULT_FIELD_ORDER: &[&str] = &["id", "name", "course", "date"];

/// Material Icons ligature for a normalized field.
pub fn field_icon(field: &str) -> &'static str {
    match field {
        "id" => "numbers",
        "name" => "account_circle",
        "email" => "email",
        "course" => "menu_book",
        "date" => "calendar_today",
        "qr" => "code",
        "link" => "apartment",
        _ => "label",
    }
}

fn social_label(name: &str) -> String {
    match name {
        "linkedin" => "LinkedIn".into(),
        "youtube" => "YouTube".into(),
        "instagram" => "Instagram".into(),
        "facebook" => "Facebook".into(),
        "twitter" => "Twitter".into(),
        other => other.to_string(),
    }
}

// -- View models --

pub struct SocialLinkView {
    pub class: String,
    pub label: String,
    pub url: String,
}

/// Header and footer content shared by every page.
pub struct PageChrome {
    pub title: String,
    pub brand: Vec<String>,
    pub logo: String,
    pub site_url: String,
    pub social_links: Vec<SocialLinkView>,
}

impl PageChrome {
    pub fn from_config(config: &CertifyConfig) -> Self {
        let branding = &config.branding;
        Self {
            title: format!("{} | Verified Certificate", config.certify.instance_name),
            brand: branding.brand.clone(),
            logo: branding.logo.clone(),
            site_url: branding.site_url.clone(),
            social_links: branding
                .social_links
                .iter()
                .map(|l| SocialLinkView {
                    class: l.name.clone(),
                    label: social_label(&l.name),
                    url: l.url.clone(),
                })
                .collect(),
        }
    }
}

/// One row of the certificate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub field: String,
    pub icon: &'static str,
    pub value: String,
    /// Inline QR image for the `qr` field.
    pub qr_image: Option<String>,
}

/// Rows to show for `record`, in `field_order`, skipping missing or empty values.
pub fn field_rows(record: &ResolvedRecord, field_order: &[String]) -> Vec<FieldRow> {
    field_order
        .iter()
        .filter_map(|field| {
            let value = record.non_empty(field)?;
            let qr_image = if field == "qr" {
                qr::qr_data_uri(value)
                    .map_err(|e| warn!(error = %e, "QR rendering failed"))
                    .ok()
            } else {
                None
            };
            Some(FieldRow {
                field: field.clone(),
                icon: field_icon(field),
                value: value.to_string(),
                qr_image,
            })
        })
        .collect()
}

/// Presentation order for `sheet`.
pub fn field_order_for(mappings: &MappingTable, sheet: &str) -> Vec<String> {
    match mappings.get(sheet) {
        Some(mapping) => mapping.field_order.clone(),
        None => DEFAULT_FIELD_ORDER.iter().map(|s| s.to_string()).collect(),
    }
}

// -- Templates --

#[derive(Template)]
#[template(path = "certificate.html")]
struct CertificateTemplate {
    page: PageChrome,
    rows: Vec<FieldRow>,
}

#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate {
    page: PageChrome,
    message: String,
    not_found: bool,
}

fn render_html<T: Template>(template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template render failed").into_response()
        }
    }
}

/// Render the page for a lookup state.
///
/// Pending states show the loading view; every failure shows "Not Found".
pub fn render_state(config: &CertifyConfig, state: &LookupState) -> Response {
    let page = PageChrome::from_config(config);
    if state.is_pending() {
        return render_html(
            &StatusTemplate {
                page,
                message: LOADING_MESSAGE.into(),
                not_found: false,
            },
            StatusCode::OK,
        );
    }

    match state {
        LookupState::Resolved { sheet, record } => {
            let order = field_order_for(&config.sheets, sheet);
            render_html(
                &CertificateTemplate {
                    page,
                    rows: field_rows(record, &order),
                },
                StatusCode::OK,
            )
        }
        _ => render_html(
            &StatusTemplate {
                page,
                message: "Certificate details".into(),
                not_found: true,
            },
            StatusCode::NOT_FOUND,
        ),
    }
}
