use proptest::prelude::*;

use super::common::*;
use crate::workflows::screening::{
    classify, normalize_text, Category, ScoringPolicy, ScreeningConfig,
};

const VOCABULARY: &[&str] = &[
    "welder", "welding", "fitter", "flux", "core", "fluxcore", "mig", "tig", "stick",
    "6g", "3g", "overhead", "stainless", "carbon", "steel", "aluminum", "blueprint",
    "tape", "measure", "grinder", "torch", "saw", "plasma", "osha", "inspection",
    "quality", "pressure", "vessel", "storage", "tank", "api", "650", "aws", "asme",
    "certified", "macaljon", "mcaljon", "coastal", "weldng", "jcb", "savannah", "31405",
    "relocate", "years", "10", "5+", "2012", "2018", "-", "to", "present", "march",
    "\n", "the", "and", "shop",
];

fn resume_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..60).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn sub_scores_stay_within_caps(text in resume_text()) {
        let policy = ScoringPolicy::default();
        let result = score(&text);

        for category in Category::ordered() {
            prop_assert!(result.score_for(category) <= category.cap(&policy));
        }
        prop_assert!(result.total_score <= policy.total_cap);
        prop_assert_eq!(result.flags.first().map(String::as_str), Some(result.verdict.label()));
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,400}") {
        let result = score(&text);
        prop_assert!(result.total_score <= 100);
    }

    #[test]
    fn scoring_is_idempotent(text in resume_text()) {
        let first = score(&text);
        prop_assert_eq!(&first, &score(&text));
        prop_assert_eq!(&first, &score(&normalize_text(&text)));
    }

    #[test]
    fn repeating_a_counted_term_changes_nothing(text in resume_text()) {
        let text = format!("{text} stainless");
        let once = score(&text);
        let twice = score(&format!("{text} stainless stainless"));
        prop_assert_eq!(once.material_experience, twice.material_experience);
    }

    #[test]
    fn higher_totals_never_worsen_the_verdict(
        low in 0u32..=100,
        bump in 0u32..=100,
        experience in prop::sample::select(vec![0u32, 5, 10, 15, 20]),
    ) {
        let policy = ScreeningConfig::default().policy;
        let high = (low + bump).min(100);
        let worse = classify(low, experience, &policy);
        let better = classify(high, experience, &policy);
        prop_assert!(worse.rank() <= better.rank(), "{low} -> {worse:?}, {high} -> {better:?}");
    }
}
