//! Read-only reference data behind the dashboard views.

use crate::config::AppConfig;
use crate::error::{Result, RiskError};
use crate::models::ActionList;
use crate::report::Export;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const SURVEY_PDF_FILE_NAME: &str = "Full_Survey.pdf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyChallenge {
    #[serde(rename = "Challenges")]
    pub challenge: String,
    #[serde(rename = "Responses")]
    pub responses: u32,
}

pub fn action_list(cfg: &AppConfig) -> ActionList {
    ActionList::new(cfg.dashboard.actions.clone())
}

/// Reads the survey CSV (`Challenges`,`Responses` columns).
pub fn load_survey_challenges(path: &Path) -> Result<Vec<SurveyChallenge>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| asset_error(path, e))?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<SurveyChallenge>, _>>()
        .map_err(|e| asset_error(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "survey challenges loaded");
    Ok(rows)
}

/// The bundled survey PDF, served verbatim as `Full_Survey.pdf`.
pub fn survey_pdf_export(path: &Path) -> Result<Export> {
    let bytes = std::fs::read(path).map_err(|e| asset_error(path, e))?;
    Ok(Export {
        file_name: SURVEY_PDF_FILE_NAME,
        bytes,
    })
}

fn asset_error(path: &Path, err: impl std::fmt::Display) -> RiskError {
    warn!(path = %path.display(), error = %err, "reference file unavailable");
    RiskError::Asset(format!("{}: {err}", path.display()))
}
