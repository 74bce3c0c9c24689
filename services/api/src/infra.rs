use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rig_ready::config::ScreeningSettings;
use rig_ready::error::AppError;
use rig_ready::workflows::screening::ScreeningEngine;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the engine from the configured rubric, letting a CLI path take precedence.
pub(crate) fn load_engine(
    settings: &ScreeningSettings,
    policy_override: Option<PathBuf>,
) -> Result<ScreeningEngine, AppError> {
    let settings = match policy_override {
        Some(path) => ScreeningSettings {
            policy_path: Some(path),
        },
        None => settings.clone(),
    };

    let rubric = settings.rubric()?;
    Ok(ScreeningEngine::new(rubric)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
