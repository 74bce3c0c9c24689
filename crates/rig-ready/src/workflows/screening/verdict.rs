use serde::{Deserialize, Serialize};

use super::config::ScoringPolicy;
use super::lexicon::{contains_word, Lexicon};
use super::normalizer::tokens;
use super::scorer::CategoryBreakdown;

/// Readiness verdict for a practical weld test, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    ReadyForTest,
    VerifyExperience,
    Promising,
    NotTestReady,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::ReadyForTest => "Ready for practical test",
            Verdict::VerifyExperience => "Verify claimed experience type",
            Verdict::Promising => "Promising, needs clarification",
            Verdict::NotTestReady => "Not test-ready",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Verdict::ReadyForTest => "Ready",
            Verdict::VerifyExperience => "Verify",
            Verdict::Promising => "Promising",
            Verdict::NotTestReady => "Not Ready",
        }
    }

    /// Higher is better.
    pub const fn rank(self) -> u8 {
        match self {
            Verdict::ReadyForTest => 3,
            Verdict::VerifyExperience => 2,
            Verdict::Promising => 1,
            Verdict::NotTestReady => 0,
        }
    }

    pub const fn ordered() -> [Verdict; 4] {
        [
            Verdict::ReadyForTest,
            Verdict::VerifyExperience,
            Verdict::Promising,
            Verdict::NotTestReady,
        ]
    }
}

/// Map a total and the experience sub-score onto a verdict, checking tiers in priority order.
pub fn classify(total: u32, experience_points: u32, policy: &ScoringPolicy) -> Verdict {
    if total >= policy.ready_threshold {
        Verdict::ReadyForTest
    } else if experience_points >= policy.top_experience_points()
        && total >= policy.verify_band_min
    {
        Verdict::VerifyExperience
    } else if total >= policy.promising_threshold {
        Verdict::Promising
    } else {
        Verdict::NotTestReady
    }
}

/// Flags that follow the verdict: geography, then each local employer, then relocation.
pub fn descriptive_flags(
    text: &str,
    breakdown: &CategoryBreakdown,
    lexicon: &Lexicon,
) -> Vec<String> {
    let mut flags = Vec::new();

    if is_local(text, lexicon) {
        flags.push(format!("Local to {}", lexicon.locality.label));
    }
    flags.extend(
        breakdown
            .local_employers
            .iter()
            .map(|employer| format!("Worked at {employer}")),
    );
    if breakdown.relocation_mentioned {
        flags.push("Mentions relocation".to_string());
    }

    flags
}

fn is_local(text: &str, lexicon: &Lexicon) -> bool {
    let locality = &lexicon.locality;

    let zip_match = tokens(text).into_iter().any(|token| {
        token.len() == 5
            && token.bytes().all(|b| b.is_ascii_digit())
            && locality
                .zip_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && token.starts_with(prefix.as_str()))
    });

    zip_match || locality.cities.iter().any(|city| contains_word(text, city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let policy = ScoringPolicy::default();
        assert_eq!(classify(85, 0, &policy), Verdict::ReadyForTest);
        assert_eq!(classify(84, 0, &policy), Verdict::Promising);
        assert_eq!(classify(65, 0, &policy), Verdict::Promising);
        assert_eq!(classify(64, 0, &policy), Verdict::NotTestReady);
    }

    #[test]
    fn strong_tenure_with_middling_total_needs_verification() {
        let policy = ScoringPolicy::default();
        assert_eq!(classify(60, 20, &policy), Verdict::VerifyExperience);
        assert_eq!(classify(84, 20, &policy), Verdict::VerifyExperience);
        assert_eq!(classify(59, 20, &policy), Verdict::NotTestReady);
        assert_eq!(classify(85, 20, &policy), Verdict::ReadyForTest);
        assert_eq!(classify(70, 15, &policy), Verdict::Promising);
    }

    #[test]
    fn zip_codes_and_cities_mark_locals() {
        let lexicon = Lexicon::standard();
        assert!(is_local("123 main st, pooler ga 31322", &lexicon));
        assert!(is_local("zip 31405", &lexicon));
        assert!(is_local("lives in garden city", &lexicon));
        assert!(!is_local("atlanta ga 30301", &lexicon));
        assert!(!is_local("phone 3140555", &lexicon));
    }

    #[test]
    fn ranks_follow_priority_order() {
        let ranks: Vec<u8> = Verdict::ordered().iter().map(|v| v.rank()).collect();
        assert_eq!(ranks, vec![3, 2, 1, 0]);
    }
}
