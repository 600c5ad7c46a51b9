//! One function per dashboard interaction. Each runs to completion and
//! returns either its rendered output or an error for `user_message`.

use crate::render;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use supplier_risk_core::dashboard;
use supplier_risk_core::extractor::format_tag_for;
use supplier_risk_core::models::{AlertRequest, ClassificationResult};
use supplier_risk_core::notifier::AlertOutcome;
use supplier_risk_core::pipeline::Services;
use supplier_risk_core::report::RiskReport;
use supplier_risk_core::RiskError;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Overview,
    Analyze,
    Classify,
    Alert,
    Survey,
}

pub fn overview(services: &Services, now: DateTime<Local>) -> String {
    let cfg = services.config();
    let mut out = String::new();

    let delays: Vec<(String, f64)> = cfg
        .dashboard
        .delays
        .iter()
        .map(|d| (d.company.clone(), d.delay))
        .collect();
    out.push_str(&render::bar_chart("Supplier Delays Overview", &delays));
    out.push('\n');

    match dashboard::load_survey_challenges(Path::new(&cfg.assets.survey_csv)) {
        Ok(rows) => {
            let rows: Vec<(String, f64)> = rows
                .into_iter()
                .map(|r| (r.challenge, f64::from(r.responses)))
                .collect();
            out.push_str(&render::bar_chart("Top Supply Chain Challenges", &rows));
        }
        Err(_) => out.push_str("warning: Survey data not found.\n"),
    }
    out.push('\n');

    out.push_str("Global Supplier Locations\n");
    let locations: Vec<Vec<String>> = cfg
        .dashboard
        .locations
        .iter()
        .map(|l| vec![l.label.clone(), format!("{:.4}", l.lat), format!("{:.4}", l.lon)])
        .collect();
    out.push_str(&render::table(&["Location", "Lat", "Lon"], &locations));
    out.push('\n');

    out.push_str("Signals of Insolvency\n");
    out.push_str(&render::bullets(
        cfg.dashboard.insolvency_signals.iter().map(String::as_str),
    ));
    out.push('\n');
    out.push_str(&last_updated(now));
    out
}

fn last_updated(now: DateTime<Local>) -> String {
    format!("Last Updated: {}\n", now.format("%Y-%m-%d %H:%M:%S"))
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub fingerprint: String,
    pub pages: usize,
    #[serde(skip)]
    pub report: RiskReport,
    pub keywords: Vec<(String, u32)>,
    pub actions: Vec<String>,
    pub export: Option<PathBuf>,
}

/// Upload a PDF, build its report and optionally write `risk_summary.txt`.
pub async fn analyze(
    services: &Services,
    path: &Path,
    out_dir: Option<&Path>,
    top: usize,
) -> Result<Analysis> {
    let bytes = std::fs::read(path).map_err(|e| {
        RiskError::InputValidation(format!("cannot read {}: {e}", path.display()))
    })?;
    let tag = format_tag_for(path, &bytes);
    let (doc, report) = services.analyze_document(bytes, &tag).await?;

    let export = match out_dir {
        Some(dir) => Some(
            report
                .export()
                .write_to(dir)
                .with_context(|| format!("writing summary into {}", dir.display()))?,
        ),
        None => None,
    };

    Ok(Analysis {
        fingerprint: doc.fingerprint().to_string(),
        pages: doc.page_count(),
        keywords: report
            .keywords()
            .top(top)
            .into_iter()
            .map(|(t, w)| (t.to_string(), w))
            .collect(),
        actions: report.actions().iter().map(str::to_string).collect(),
        report,
        export,
    })
}

pub fn render_analysis(analysis: &Analysis, top: usize, now: DateTime<Local>) -> String {
    let mut out = format!(
        "Text extracted successfully! ({} page(s))\n\nExtracted Word Cloud\n",
        analysis.pages
    );
    out.push_str(&render::keyword_cloud(analysis.report.keywords(), top));
    out.push_str("\nImmediate Measures to Take\n");
    out.push_str(&render::bullets(analysis.report.actions().iter()));
    if let Some(path) = &analysis.export {
        out.push_str(&format!("\nRisk report summary exported to {}\n", path.display()));
    }
    out.push('\n');
    out.push_str(&last_updated(now));
    out
}

pub async fn classify(services: &Services, text: &str) -> Result<ClassificationResult> {
    // Validate before touching any provider.
    if text.trim().is_empty() {
        return Err(RiskError::InputValidation("text to classify is empty".into()).into());
    }
    let classifier = services.classifier()?;
    Ok(classifier.classify(text).await?)
}

pub fn render_classification(result: &ClassificationResult) -> String {
    format!(
        "Predicted Risk Level: {} (Confidence: {:.2})\n",
        result.label, result.confidence
    )
}

pub async fn alert(
    services: &Services,
    to: &str,
    subject: Option<&str>,
    message: &str,
) -> Result<AlertOutcome> {
    let request = AlertRequest {
        to: to.to_string(),
        subject: subject
            .map(str::to_string)
            .unwrap_or_else(|| services.config().alerts.subject.clone()),
        body: message.to_string(),
    };
    Ok(services.notifier.send(&request).await?)
}

pub fn render_alert(outcome: &AlertOutcome) -> String {
    match outcome {
        AlertOutcome::Simulated { to } => format!("Simulated alert sent to: {to}\n"),
        AlertOutcome::Delivered { to } => format!("Alert delivered to: {to}\n"),
    }
}

pub fn survey(
    services: &Services,
    export_dir: Option<&Path>,
    now: DateTime<Local>,
) -> Result<String> {
    let cfg = services.config();
    let mut out = String::from("Respondent Demographics\n");
    let rows: Vec<Vec<String>> = cfg
        .survey
        .demographics
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.organization.clone(),
                r.role.clone(),
                r.size.clone(),
                r.industry.clone(),
            ]
        })
        .collect();
    out.push_str(&render::table(
        &["Name", "Organization", "Role", "Size", "Industry"],
        &rows,
    ));
    out.push('\n');

    let ratings: Vec<(String, f64)> = cfg
        .survey
        .criticality
        .iter()
        .map(|c| (c.rating.clone(), f64::from(c.responses)))
        .collect();
    out.push_str(&render::bar_chart(
        "Criticality of Early-Warning Systems",
        &ratings,
    ));
    out.push('\n');

    out.push_str("Feature Suggestions from Experts\n");
    let suggestions = services.summarizer.summarize(&cfg.survey.suggestions);
    out.push_str(&render::keyword_cloud(&suggestions, 50));
    out.push('\n');

    if let Some(dir) = export_dir {
        match dashboard::survey_pdf_export(Path::new(&cfg.assets.survey_pdf)) {
            Ok(export) => {
                let path = export
                    .write_to(dir)
                    .with_context(|| format!("writing survey PDF into {}", dir.display()))?;
                info!(path = %path.display(), "survey PDF exported");
                out.push_str(&format!("Full survey PDF exported to {}\n", path.display()));
            }
            Err(_) => out.push_str("warning: Full survey PDF not found.\n"),
        }
        out.push('\n');
    }
    out.push_str(&last_updated(now));
    Ok(out)
}

/// Turns an interaction failure into the message shown to the user.
pub fn user_message(interaction: Interaction, err: &anyhow::Error) -> String {
    let risk = err.downcast_ref::<RiskError>();
    match (interaction, risk) {
        (Interaction::Classify, Some(RiskError::InputValidation(_))) => {
            "Please enter text to classify.".to_string()
        }
        (Interaction::Alert, Some(RiskError::InputValidation(_))) => {
            "Please enter a valid email.".to_string()
        }
        (Interaction::Analyze, _) => format!("Error processing PDF: {err:#}"),
        (_, Some(e)) => e.to_string(),
        (_, None) => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_each_interaction() {
        let err: anyhow::Error = RiskError::InputValidation("empty".into()).into();
        assert_eq!(
            user_message(Interaction::Classify, &err),
            "Please enter text to classify."
        );
        assert_eq!(
            user_message(Interaction::Alert, &err),
            "Please enter a valid email."
        );
    }

    #[test]
    fn analyze_failures_keep_their_cause() {
        let err: anyhow::Error = RiskError::Extraction("xref table is corrupt".into()).into();
        assert_eq!(
            user_message(Interaction::Analyze, &err),
            "Error processing PDF: could not extract text: xref table is corrupt"
        );
    }

    #[test]
    fn classification_line_rounds_confidence() {
        let line = render_classification(&ClassificationResult {
            label: "NEGATIVE".into(),
            confidence: 0.99871,
        });
        assert_eq!(line, "Predicted Risk Level: NEGATIVE (Confidence: 1.00)\n");
    }
}
