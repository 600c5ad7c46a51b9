use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use providers::smtp::TlsMode;

const DEFAULTS: &str = include_str!("../config/defaults.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub keywords: KeywordConfig,
    pub classifier: ClassifierConfig,
    pub alerts: AlertConfig,
    pub assets: AssetPaths,
    pub dashboard: DashboardData,
    pub survey: SurveyData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub timeout_secs: u64,
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub case_fold: bool,
    pub min_token_len: usize,
    pub normalize_plurals: bool,
    pub max_words: usize,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            case_fold: true,
            min_token_len: 1,
            normalize_plurals: false,
            max_words: usize::MAX,
            stopwords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub provider: String,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API token.
    #[serde(default)]
    pub token_env: Option<String>,
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertMode {
    Simulated,
    Live,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub mode: AlertMode,
    pub subject: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,
}

impl AlertConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub tls: TlsMode,
    pub sender: String,
    pub username: String,
    /// Name of the environment variable holding the relay password.
    pub password_env: String,
}

fn default_smtp_port() -> u16 {
    465
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPaths {
    pub survey_csv: String,
    pub survey_pdf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub delays: Vec<SupplierDelay>,
    pub locations: Vec<SupplierLocation>,
    pub insolvency_signals: Vec<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierDelay {
    pub company: String,
    pub delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierLocation {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyData {
    pub demographics: Vec<Respondent>,
    pub criticality: Vec<CriticalityRating>,
    pub suggestions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Respondent {
    pub name: String,
    pub organization: String,
    pub role: String,
    pub size: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalityRating {
    pub rating: String,
    pub responses: u32,
}

/// Built-in defaults, then an optional TOML file, then `SUPPLIER_RISK__*` env vars.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder()
        .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml));
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("SUPPLIER_RISK")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

/// The embedded defaults alone, ignoring files and environment.
pub fn defaults() -> anyhow::Result<AppConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::from_str(DEFAULTS, config::FileFormat::Toml))
        .build()?;
    Ok(cfg.try_deserialize()?)
}
