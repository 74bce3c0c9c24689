use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use super::config::{ScoringPolicy, ScreeningConfig};
use super::experience::ExperienceEstimate;
use super::lexicon::{sum_matches, LexiconEntry};
use super::normalizer::tokens;

/// Rubric dimensions. The first five form the base score, the rest are bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Experience,
    WeldingProcess,
    MaterialExperience,
    ToolsFitUp,
    SafetyInspection,
    TankWork,
    Certifications,
    LocalEmployer,
    Relocation,
}

impl Category {
    pub const fn ordered() -> [Category; 9] {
        [
            Category::Experience,
            Category::WeldingProcess,
            Category::MaterialExperience,
            Category::ToolsFitUp,
            Category::SafetyInspection,
            Category::TankWork,
            Category::Certifications,
            Category::LocalEmployer,
            Category::Relocation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Experience => "Experience Match",
            Category::WeldingProcess => "Welding Process Match",
            Category::MaterialExperience => "Material Experience",
            Category::ToolsFitUp => "Tools & Fit-Up Match",
            Category::SafetyInspection => "Safety & Inspection",
            Category::TankWork => "Bonus - Tank Work",
            Category::Certifications => "Bonus - Certifications",
            Category::LocalEmployer => "Bonus - Local Shop",
            Category::Relocation => "Bonus - Relocation",
        }
    }

    pub const fn is_bonus(self) -> bool {
        matches!(
            self,
            Category::TankWork
                | Category::Certifications
                | Category::LocalEmployer
                | Category::Relocation
        )
    }

    pub fn cap(self, policy: &ScoringPolicy) -> u32 {
        match self {
            Category::Experience => policy.experience_cap,
            Category::WeldingProcess => policy.process_cap,
            Category::MaterialExperience => policy.material_cap,
            Category::ToolsFitUp => policy.tools_fit_up_cap,
            Category::SafetyInspection => policy.safety_cap,
            Category::TankWork => policy.tank_work_bonus,
            Category::Certifications => policy.certification_cap,
            Category::LocalEmployer => policy.local_employer_cap,
            Category::Relocation => policy.relocation_bonus,
        }
    }
}

/// Points attributed to one category before and after its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub raw_points: u32,
    pub capped_points: u32,
}

impl CategoryScore {
    fn new(category: Category, raw_points: u32, policy: &ScoringPolicy) -> Self {
        Self {
            category,
            raw_points,
            capped_points: raw_points.min(category.cap(policy)),
        }
    }

    fn boost(&mut self, points: u32, policy: &ScoringPolicy) {
        *self = Self::new(self.category, self.raw_points.saturating_add(points), policy);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// One entry per category, in `Category::ordered()` order.
    pub scores: Vec<CategoryScore>,
    /// Display names of the local employers found, in lexicon order.
    pub local_employers: Vec<String>,
    pub relocation_mentioned: bool,
    /// Sum of the capped core categories.
    pub base_score: u32,
}

impl CategoryBreakdown {
    pub fn points(&self, category: Category) -> u32 {
        self.scores
            .iter()
            .find(|score| score.category == category)
            .map(|score| score.capped_points)
            .unwrap_or(0)
    }

    pub fn bonus_total(&self) -> u32 {
        self.scores
            .iter()
            .filter(|score| score.category.is_bonus())
            .map(|score| score.capped_points)
            .fold(0, u32::saturating_add)
    }
}

/// Apply the rubric tables to normalized text.
pub fn score_categories(
    text: &str,
    estimate: &ExperienceEstimate,
    config: &ScreeningConfig,
) -> CategoryBreakdown {
    let policy = &config.policy;
    let lexicon = &config.lexicon;

    let experience = CategoryScore::new(
        Category::Experience,
        policy.experience_points(estimate.years),
        policy,
    );

    let (process_points, _) = sum_matches(&lexicon.processes, text);
    let (position_points, _) = sum_matches(&lexicon.positions, text);
    let process = CategoryScore::new(
        Category::WeldingProcess,
        process_points.saturating_add(position_points),
        policy,
    );

    let (material_points, _) = sum_matches(&lexicon.materials, text);
    let materials = CategoryScore::new(Category::MaterialExperience, material_points, policy);

    let (fit_up_points, _) = sum_matches(&lexicon.fit_up, text);
    let tool_hits = lexicon.tools.iter().filter(|tool| tool.matches(text)).count() as u32;
    let tool_points = (tool_hits / policy.tool_hits_per_point.max(1)).min(policy.tool_points_max);
    let mut tools = CategoryScore::new(
        Category::ToolsFitUp,
        fit_up_points.saturating_add(tool_points),
        policy,
    );

    let (safety_points, _) = sum_matches(&lexicon.safety, text);
    let mut safety = CategoryScore::new(Category::SafetyInspection, safety_points, policy);

    let local_employers = matched_employers(&lexicon.local_employers, text, policy);
    let local_points = lexicon
        .local_employers
        .iter()
        .filter(|entry| local_employers.contains(&entry.label))
        .map(|entry| entry.weight)
        .fold(0, u32::saturating_add);
    let local = CategoryScore::new(Category::LocalEmployer, local_points, policy);

    // A known local shop implies baseline fit-up and safety habits.
    if !local_employers.is_empty() {
        if tools.capped_points < policy.local_tools_floor {
            tools.boost(policy.local_tools_boost, policy);
        }
        if safety.capped_points < policy.local_safety_floor {
            safety.boost(policy.local_safety_boost, policy);
        }
    }

    let base_score = [experience, process, materials, tools, safety]
        .iter()
        .map(|score| score.capped_points)
        .fold(0, u32::saturating_add);

    let tank_points = if lexicon.tank_work.iter().any(|entry| entry.matches(text)) {
        policy.tank_work_bonus
    } else {
        0
    };
    let tank = CategoryScore::new(Category::TankWork, tank_points, policy);

    let (cert_points, _) = sum_matches(&lexicon.certifications, text);
    let certifications = CategoryScore::new(Category::Certifications, cert_points, policy);

    let relocation_mentioned = lexicon.relocation.iter().any(|entry| entry.matches(text));
    let relocation_points = if relocation_mentioned && base_score >= policy.relocation_min_base_score {
        policy.relocation_bonus
    } else {
        0
    };
    let relocation = CategoryScore::new(Category::Relocation, relocation_points, policy);

    CategoryBreakdown {
        scores: vec![
            experience,
            process,
            materials,
            tools,
            safety,
            tank,
            certifications,
            local,
            relocation,
        ],
        local_employers,
        relocation_mentioned,
        base_score,
    }
}

/// Local employers named in the text, tolerating small misspellings of longer names.
fn matched_employers(entries: &[LexiconEntry], text: &str, policy: &ScoringPolicy) -> Vec<String> {
    let words = tokens(text);

    entries
        .iter()
        .filter(|entry| entry.matches(text) || fuzzy_matches(entry, &words, policy))
        .map(|entry| entry.label.clone())
        .collect()
}

fn fuzzy_matches(entry: &LexiconEntry, words: &[&str], policy: &ScoringPolicy) -> bool {
    if policy.fuzzy_max_distance == 0 {
        return false;
    }

    entry.aliases.iter().any(|alias| {
        let alias_words = tokens(alias);
        let width = alias_words.len();
        let target = alias_words.join(" ");
        if width == 0 || target.len() < policy.fuzzy_min_token_len || words.len() < width {
            return false;
        }

        words.windows(width).any(|window| {
            let candidate = window.join(" ");
            candidate.len().abs_diff(target.len()) <= policy.fuzzy_max_distance
                && candidate.len() >= policy.fuzzy_min_token_len
                && levenshtein(&candidate, &target) <= policy.fuzzy_max_distance
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::experience::EstimateMethod;

    fn estimate(years: u32) -> ExperienceEstimate {
        ExperienceEstimate {
            years,
            method: EstimateMethod::Explicit,
            spans: Vec::new(),
        }
    }

    fn score(text: &str, years: u32) -> CategoryBreakdown {
        score_categories(text, &estimate(years), &ScreeningConfig::default())
    }

    #[test]
    fn process_families_are_additive_and_capped() {
        let breakdown = score("flux core, mig, stick and tig", 0);
        let process = breakdown.scores[1];
        assert_eq!(process.category, Category::WeldingProcess);
        assert_eq!(process.raw_points, 40);
        assert_eq!(process.capped_points, 30);
    }

    #[test]
    fn position_terms_add_a_small_bonus() {
        let breakdown = score("tig 6g pipe", 0);
        assert_eq!(breakdown.points(Category::WeldingProcess), 12);
    }

    #[test]
    fn tool_hits_saturate() {
        let breakdown = score("grinder torch saw plasma beveler caliper micrometer square", 0);
        assert_eq!(breakdown.points(Category::ToolsFitUp), 4);

        let breakdown = score("blueprint tape measure math grinder torch saw plasma", 0);
        assert_eq!(breakdown.scores[3].raw_points, 12);
        assert_eq!(breakdown.points(Category::ToolsFitUp), 10);
    }

    #[test]
    fn tank_bonus_is_all_or_nothing() {
        assert_eq!(score("pressure vessel", 0).points(Category::TankWork), 30);
        assert_eq!(
            score("api 650 tank fabrication pressure vessel", 0).points(Category::TankWork),
            30
        );
        assert_eq!(score("trailer frames", 0).points(Category::TankWork), 0);
    }

    #[test]
    fn certifications_weigh_accredited_bodies_higher() {
        assert_eq!(score("aws", 0).points(Category::Certifications), 7);
        assert_eq!(score("welding school", 0).points(Category::Certifications), 5);
        assert_eq!(score("certified", 0).points(Category::Certifications), 3);
        assert_eq!(score("aws certified 6g", 0).points(Category::Certifications), 10);
    }

    #[test]
    fn local_employers_accumulate_up_to_cap() {
        let breakdown = score("jcb, then big john trailers", 0);
        assert_eq!(breakdown.points(Category::LocalEmployer), 10);
        assert_eq!(breakdown.local_employers, vec!["JCB", "Big John Trailers"]);

        let breakdown = score("macaljon and coastal welding", 0);
        assert_eq!(breakdown.scores[7].raw_points, 27);
        assert_eq!(breakdown.points(Category::LocalEmployer), 15);
    }

    #[test]
    fn misspelled_employer_matches_fuzzily() {
        let breakdown = score("fitter at mcaljon steel", 0);
        assert_eq!(breakdown.local_employers, vec!["Macaljon"]);

        let breakdown = score("fitter at coastal weldng", 0);
        assert_eq!(breakdown.local_employers, vec!["Coastal Welding"]);
    }

    #[test]
    fn short_aliases_are_never_fuzzed() {
        let breakdown = score("jcv", 0);
        assert!(breakdown.local_employers.is_empty());
    }

    #[test]
    fn local_employer_lifts_weak_tools_and_safety() {
        let breakdown = score("macaljon", 0);
        assert_eq!(breakdown.points(Category::ToolsFitUp), 3);
        assert_eq!(breakdown.points(Category::SafetyInspection), 2);

        let breakdown = score("macaljon blueprint osha", 0);
        assert_eq!(breakdown.points(Category::ToolsFitUp), 5);
        assert_eq!(breakdown.points(Category::SafetyInspection), 3);
    }

    #[test]
    fn relocation_needs_a_solid_base() {
        let weak = score("willing to relocate", 0);
        assert!(weak.relocation_mentioned);
        assert_eq!(weak.points(Category::Relocation), 0);

        let strong = score(
            "willing to relocate. flux core mig stainless carbon blueprint osha",
            10,
        );
        assert!(strong.base_score >= 50);
        assert_eq!(strong.points(Category::Relocation), 5);
    }

    #[test]
    fn base_score_excludes_bonuses() {
        let breakdown = score("pressure vessel aws", 0);
        assert_eq!(breakdown.base_score, 0);
        assert_eq!(breakdown.bonus_total(), 37);
    }

    #[test]
    fn oversized_weights_saturate_instead_of_overflowing() {
        let mut config = ScreeningConfig::default();
        config.lexicon.materials[0].weight = u32::MAX;
        config.lexicon.materials[1].weight = u32::MAX;
        config.policy.material_cap = u32::MAX;

        let breakdown = score_categories("stainless and carbon", &estimate(0), &config);
        assert_eq!(breakdown.scores[2].raw_points, u32::MAX);
        assert_eq!(breakdown.points(Category::MaterialExperience), u32::MAX);
        assert_eq!(breakdown.base_score, u32::MAX);
    }
}
