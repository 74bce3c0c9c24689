//! Rule-based readiness screening of welding résumés.
//!
//! Raw text is normalized once, then fed to the experience estimator and the
//! table-driven category scorer. The verdict classifier turns the capped totals into
//! an ordered verdict plus descriptive flags. Every stage is a pure function of the
//! text and the immutable [`ScreeningConfig`].

pub mod batch;
pub mod config;
pub mod dates;
pub mod experience;
pub mod lexicon;
pub mod normalizer;
pub mod router;
pub mod scorer;
pub mod verdict;

#[cfg(test)]
mod tests;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub use batch::{BatchError, BatchSummary, ScoredDocument, SummaryRow};
pub use config::{ExperienceTier, PolicyError, ScoringPolicy, ScreeningConfig, MAX_TOTAL_SCORE};
pub use experience::{estimate_experience, EstimateMethod, ExperienceEstimate};
pub use lexicon::{Lexicon, LexiconEntry, Locality, MatchMode};
pub use normalizer::normalize_text;
pub use router::screening_router;
pub use scorer::{score_categories, Category, CategoryBreakdown, CategoryScore};
pub use verdict::{classify, descriptive_flags, Verdict};

/// Caller contract violations. Well-formed text never produces an error.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Stateless scorer holding the validated rubric.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    config: ScreeningConfig,
}

impl ScreeningEngine {
    pub fn new(config: ScreeningConfig) -> Result<Self, PolicyError> {
        let config = config.normalized();
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Score raw résumé text, resolving "present" against today's local date.
    pub fn score(&self, raw: &str) -> ScoringResult {
        self.score_as_of(raw, Local::now().date_naive())
    }

    pub fn score_as_of(&self, raw: &str, today: NaiveDate) -> ScoringResult {
        let text = normalize_text(raw);
        let policy = &self.config.policy;

        let estimate = estimate_experience(&text, &self.config.lexicon, policy, today);
        let breakdown = score_categories(&text, &estimate, &self.config);

        let total_score = breakdown
            .base_score
            .saturating_add(breakdown.bonus_total())
            .min(policy.total_cap.min(MAX_TOTAL_SCORE));
        let experience_points = breakdown.points(Category::Experience);
        let verdict = classify(total_score, experience_points, policy);

        let mut flags = vec![verdict.label().to_string()];
        flags.extend(descriptive_flags(
            &text,
            &breakdown,
            &self.config.lexicon,
        ));

        tracing::debug!(
            total_score,
            verdict = verdict.short_label(),
            method = estimate.method.label(),
            years = estimate.years,
            "scored résumé"
        );

        ScoringResult {
            experience_match: experience_points,
            welding_process_match: breakdown.points(Category::WeldingProcess),
            material_experience: breakdown.points(Category::MaterialExperience),
            tools_fit_up_match: breakdown.points(Category::ToolsFitUp),
            safety_inspection: breakdown.points(Category::SafetyInspection),
            tank_work_bonus: breakdown.points(Category::TankWork),
            certification_bonus: breakdown.points(Category::Certifications),
            local_employer_bonus: breakdown.points(Category::LocalEmployer),
            relocation_bonus: breakdown.points(Category::Relocation),
            total_score,
            verdict,
            flags,
            experience_years: estimate.years,
            experience_method: estimate.method,
            breakdown: breakdown.scores,
        }
    }

    /// Score an optional document, rejecting a missing text instead of coercing it.
    pub fn score_document(&self, raw: Option<&str>) -> Result<ScoringResult, ScreeningError> {
        let raw = raw.ok_or_else(|| {
            ScreeningError::InvalidInput("résumé text is required".to_string())
        })?;
        Ok(self.score(raw))
    }
}

/// Scoring output for one résumé. Field names and caps are the stable contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub experience_match: u32,
    pub welding_process_match: u32,
    pub material_experience: u32,
    pub tools_fit_up_match: u32,
    pub safety_inspection: u32,
    pub tank_work_bonus: u32,
    pub certification_bonus: u32,
    pub local_employer_bonus: u32,
    pub relocation_bonus: u32,
    pub total_score: u32,
    pub verdict: Verdict,
    /// Verdict label first, then descriptive flags in evaluation order.
    pub flags: Vec<String>,
    pub experience_years: u32,
    pub experience_method: EstimateMethod,
    pub breakdown: Vec<CategoryScore>,
}

impl ScoringResult {
    pub fn score_for(&self, category: Category) -> u32 {
        match category {
            Category::Experience => self.experience_match,
            Category::WeldingProcess => self.welding_process_match,
            Category::MaterialExperience => self.material_experience,
            Category::ToolsFitUp => self.tools_fit_up_match,
            Category::SafetyInspection => self.safety_inspection,
            Category::TankWork => self.tank_work_bonus,
            Category::Certifications => self.certification_bonus,
            Category::LocalEmployer => self.local_employer_bonus,
            Category::Relocation => self.relocation_bonus,
        }
    }
}
