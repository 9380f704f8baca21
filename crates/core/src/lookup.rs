//! Certificate lookup pipeline: query intake, remote fetch and row resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{LookupError, Result};
use crate::models::grid::SheetGrid;
use crate::models::mapping::MappingTable;
use crate::models::query::Query;
use crate::models::record::ResolvedRecord;
use crate::resolver;

/// A remote source of sheet data.
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Fetch every row of `sheet`. A response without data yields an empty grid.
    async fn fetch_grid(&self, sheet: &str) -> Result<SheetGrid>;
}

/// Per-request lookup state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    /// No `id` was supplied; nothing will be fetched.
    Idle,
    Loading { sheet: String, id: String },
    Resolved { sheet: String, record: ResolvedRecord },
    NotFound { sheet: String },
}

impl LookupState {
    /// Enter the pipeline for `query`: `Loading` when an id is present, else `Idle`.
    pub fn start(query: &Query) -> Self {
        match &query.id {
            Some(id) => LookupState::Loading {
                sheet: query.sheet.clone(),
                id: id.clone(),
            },
            None => LookupState::Idle,
        }
    }

    /// Apply the outcome of a fetch. Only `Loading` moves; every other state is terminal.
    pub fn complete(self, outcome: std::result::Result<ResolvedRecord, LookupError>) -> Self {
        match self {
            LookupState::Loading { sheet, .. } => match outcome {
                Ok(record) => LookupState::Resolved { sheet, record },
                Err(_) => LookupState::NotFound { sheet },
            },
            other => other,
        }
    }

    /// True while no record or verdict exists. `Idle` counts: it never gets data.
    pub fn is_pending(&self) -> bool {
        matches!(self, LookupState::Loading { .. } | LookupState::Idle)
    }
}

/// Runs one lookup per request against a shared [`GridSource`].
#[derive(Clone)]
pub struct CertificateLookup {
    source: Arc<dyn GridSource>,
    mappings: Arc<MappingTable>,
}

impl CertificateLookup {
    pub fn new(source: Arc<dyn GridSource>, mappings: MappingTable) -> Self {
        Self {
            source,
            mappings: Arc::new(mappings),
        }
    }

    /// Fetch and resolve `id` from `sheet`.
    ///
    /// Unknown sheets are rejected before any request is made.
    pub async fn fetch_and_resolve(
        &self,
        sheet: &str,
        id: &str,
    ) -> std::result::Result<ResolvedRecord, LookupError> {
        if !self.mappings.contains(sheet) {
            return Err(LookupError::UnsupportedSheet(sheet.to_string()));
        }
        let grid = self.source.fetch_grid(sheet).await?;
        resolver::resolve(&grid, sheet, id, &self.mappings)
    }

    /// Drive `query` through the state machine to a terminal state.
    pub async fn run(&self, query: &Query) -> LookupState {
        let state = LookupState::start(query);
        let Some(id) = query.id.as_deref() else {
            return state;
        };
        let sheet = query.sheet.as_str();

        let outcome = self.fetch_and_resolve(sheet, id).await;
        match &outcome {
            Ok(_) => info!(sheet = %sheet, id = %id, "certificate resolved"),
            Err(e) => warn!(sheet = %sheet, id = %id, kind = e.kind(), error = %e, "certificate lookup failed"),
        }
        state.complete(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CertifyError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        rows: Option<Vec<Vec<String>>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn with_rows(rows: &[&[&str]]) -> Self {
            Self {
                rows: Some(
                    rows.iter()
                        .map(|r| r.iter().map(|c| c.to_string()).collect())
                        .collect(),
                ),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                rows: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GridSource for StubSource {
        async fn fetch_grid(&self, _sheet: &str) -> Result<SheetGrid> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.rows {
                Some(rows) => Ok(SheetGrid::new(rows.clone())),
                None => Err(CertifyError::Sheets("connection refused".into())),
            }
        }
    }

    fn scenario_source() -> Arc<StubSource> {
        Arc::new(StubSource::with_rows(&[
            &["C.ID", "Name", "Course", "Date"],
            &["S001", "Asha", "Data Science", "2024-01-10"],
        ]))
    }

    #[tokio::test]
    async fn resolves_known_id() {
        let source = scenario_source();
        let lookup = CertificateLookup::new(source.clone(), MappingTable::shipped());

        let state = lookup.run(&Query::new("S001", "Sheet1")).await;
        let LookupState::Resolved { record, .. } = &state else {
            panic!("expected a resolved record, got {state:?}");
        };
        assert_eq!(record.get("id"), Some("S001"));
        assert_eq!(record.get("name"), Some("Asha"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let lookup = CertificateLookup::new(scenario_source(), MappingTable::shipped());
        let state = lookup.run(&Query::new("S999", "Sheet1")).await;
        assert_eq!(
            state,
            LookupState::NotFound {
                sheet: "Sheet1".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_id_stays_idle_without_fetching() {
        let source = scenario_source();
        let lookup = CertificateLookup::new(source.clone(), MappingTable::shipped());
        let state = lookup.run(&Query::from_params(None, None)).await;
        assert_eq!(state, LookupState::Idle);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_sheet_is_not_found_without_fetching() {
        let source = scenario_source();
        let lookup = CertificateLookup::new(source.clone(), MappingTable::shipped());
        let err = lookup.fetch_and_resolve("Unknown", "S001").await.unwrap_err();
        assert_eq!(err, LookupError::UnsupportedSheet("Unknown".into()));

        let state = lookup.run(&Query::new("S001", "Unknown")).await;
        assert!(matches!(state, LookupState::NotFound { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_failure_is_not_found() {
        let lookup = CertificateLookup::new(Arc::new(StubSource::failing()), MappingTable::shipped());
        let err = lookup.fetch_and_resolve("Sheet1", "S001").await.unwrap_err();
        assert!(matches!(err, LookupError::NetworkFailure(_)));

        let state = lookup.run(&Query::new("S001", "Sheet1")).await;
        assert!(matches!(state, LookupState::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_response_is_not_found() {
        let lookup = CertificateLookup::new(
            Arc::new(StubSource::with_rows(&[])),
            MappingTable::shipped(),
        );
        let err = lookup.fetch_and_resolve("Sheet1", "S001").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponseShape(_)));
    }

    #[test]
    fn terminal_states_ignore_completion() {
        let record: ResolvedRecord = [("id", "S001")].into_iter().collect();
        assert_eq!(LookupState::Idle.complete(Ok(record.clone())), LookupState::Idle);

        let not_found = LookupState::NotFound {
            sheet: "Sheet1".into(),
        };
        assert_eq!(not_found.clone().complete(Ok(record)), not_found);
    }

    #[test]
    fn start_enters_loading_with_id() {
        let state = LookupState::start(&Query::new("S001", "FS_Workshop"));
        assert_eq!(
            state,
            LookupState::Loading {
                sheet: "FS_Workshop".into(),
                id: "S001".into()
            }
        );
        assert!(state.is_pending());
    }
}
