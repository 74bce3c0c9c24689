use std::path::Path;

use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;

/// Upper bound of the readiness total. `total_cap` may lower it, never raise it.
pub const MAX_TOTAL_SCORE: u32 = 100;

/// Minimum estimated years that earn a given experience score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTier {
    pub min_years: u32,
    pub points: u32,
}

/// Caps, tiers and thresholds of the readiness rubric.
///
/// These are shop policy, tuned by hand. The defaults reproduce the rubric used for
/// the Savannah tank shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub experience_cap: u32,
    pub process_cap: u32,
    pub material_cap: u32,
    pub tools_fit_up_cap: u32,
    pub safety_cap: u32,
    pub tank_work_bonus: u32,
    pub certification_cap: u32,
    pub local_employer_cap: u32,
    pub relocation_bonus: u32,
    pub total_cap: u32,

    /// Ordered from the highest `min_years` down.
    pub experience_tiers: Vec<ExperienceTier>,

    /// Every `tool_hits_per_point` generic tool mentions earn one point.
    pub tool_hits_per_point: u32,
    pub tool_points_max: u32,

    pub relocation_min_base_score: u32,

    pub local_tools_floor: u32,
    pub local_tools_boost: u32,
    pub local_safety_floor: u32,
    pub local_safety_boost: u32,

    pub fuzzy_max_distance: usize,
    pub fuzzy_min_token_len: usize,

    pub context_window_chars: usize,
    pub context_preceding_lines: usize,
    pub max_years_from_dates: u32,
    pub job_title_min_mentions: usize,
    pub job_title_proxy_years: u32,

    pub ready_threshold: u32,
    pub verify_band_min: u32,
    pub promising_threshold: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            experience_cap: 20,
            process_cap: 30,
            material_cap: 25,
            tools_fit_up_cap: 10,
            safety_cap: 5,
            tank_work_bonus: 30,
            certification_cap: 10,
            local_employer_cap: 15,
            relocation_bonus: 5,
            total_cap: 100,
            experience_tiers: vec![
                ExperienceTier { min_years: 8, points: 20 },
                ExperienceTier { min_years: 5, points: 15 },
                ExperienceTier { min_years: 3, points: 10 },
                ExperienceTier { min_years: 1, points: 5 },
            ],
            tool_hits_per_point: 2,
            tool_points_max: 5,
            relocation_min_base_score: 50,
            local_tools_floor: 4,
            local_tools_boost: 3,
            local_safety_floor: 2,
            local_safety_boost: 2,
            fuzzy_max_distance: 1,
            fuzzy_min_token_len: 5,
            context_window_chars: 100,
            context_preceding_lines: 3,
            max_years_from_dates: 20,
            job_title_min_mentions: 3,
            job_title_proxy_years: 1,
            ready_threshold: 85,
            verify_band_min: 60,
            promising_threshold: 65,
        }
    }
}

impl ScoringPolicy {
    /// Experience points for an estimate, from the first tier the years reach.
    pub fn experience_points(&self, years: u32) -> u32 {
        self.experience_tiers
            .iter()
            .find(|tier| years >= tier.min_years)
            .map(|tier| tier.points.min(self.experience_cap))
            .unwrap_or(0)
    }

    /// Points awarded by the top experience tier.
    pub fn top_experience_points(&self) -> u32 {
        self.experience_tiers
            .first()
            .map(|tier| tier.points.min(self.experience_cap))
            .unwrap_or(self.experience_cap)
    }

    fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.experience_tiers.is_empty() {
            errors.push("policy.experience_tiers: at least one tier is required".to_string());
        }
        for (i, pair) in self.experience_tiers.windows(2).enumerate() {
            if pair[1].min_years >= pair[0].min_years {
                errors.push(format!(
                    "policy.experience_tiers[{}]: min_years {} must be below the previous tier's {}",
                    i + 1,
                    pair[1].min_years,
                    pair[0].min_years
                ));
            }
        }
        for (i, tier) in self.experience_tiers.iter().enumerate() {
            if tier.points > self.experience_cap {
                errors.push(format!(
                    "policy.experience_tiers[{}]: {} points exceeds experience_cap {}",
                    i, tier.points, self.experience_cap
                ));
            }
        }
        if self.tool_hits_per_point == 0 {
            errors.push("policy.tool_hits_per_point: must be at least 1".to_string());
        }
        if self.promising_threshold > self.ready_threshold {
            errors.push(format!(
                "policy.promising_threshold: {} must not exceed ready_threshold {}",
                self.promising_threshold, self.ready_threshold
            ));
        }
        if self.verify_band_min > self.ready_threshold {
            errors.push(format!(
                "policy.verify_band_min: {} must not exceed ready_threshold {}",
                self.verify_band_min, self.ready_threshold
            ));
        }
        if self.total_cap > MAX_TOTAL_SCORE {
            errors.push(format!(
                "policy.total_cap: {} exceeds the {} point scale",
                self.total_cap, MAX_TOTAL_SCORE
            ));
        }
        if self.ready_threshold > self.total_cap {
            errors.push(format!(
                "policy.ready_threshold: {} is unreachable with total_cap {}",
                self.ready_threshold, self.total_cap
            ));
        }
        if self.fuzzy_max_distance > 3 {
            errors.push(format!(
                "policy.fuzzy_max_distance: {} is too loose (max 3)",
                self.fuzzy_max_distance
            ));
        }

        errors
    }
}

/// Rubric the screening engine is built from: policy constants plus term tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    #[serde(default)]
    pub policy: ScoringPolicy,
    #[serde(default)]
    pub lexicon: Lexicon,
}

impl ScreeningConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, PolicyError> {
        let config: ScreeningConfig = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            policy: self.policy,
            lexicon: self.lexicon.into_lowercased(),
        }
    }

    /// Check the rubric and report every problem found, not just the first.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let mut errors = self.policy.violations();
        errors.extend(
            self.lexicon
                .empty_groups()
                .into_iter()
                .map(|group| format!("lexicon.{group}: must contain at least one entry")),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::Invalid(errors))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read rubric file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rubric JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid rubric: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
