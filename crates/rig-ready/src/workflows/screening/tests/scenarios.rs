use super::common::*;
use crate::workflows::screening::{
    Category, EstimateMethod, ScreeningConfig, ScreeningEngine, ScreeningError, Verdict,
};

#[test]
fn strong_local_tank_welder_is_ready_for_test() {
    let result = score(STRONG_RESUME);

    assert_eq!(result.experience_match, 20);
    assert_eq!(result.experience_method, EstimateMethod::DateRanges);
    assert_eq!(result.experience_years, 11);
    assert_eq!(result.welding_process_match, 27);
    assert_eq!(result.material_experience, 25);
    assert_eq!(result.tools_fit_up_match, 10);
    assert_eq!(result.safety_inspection, 3);
    assert_eq!(result.tank_work_bonus, 30);
    assert_eq!(result.certification_bonus, 10);
    assert_eq!(result.local_employer_bonus, 15);
    assert_eq!(result.relocation_bonus, 0);
    assert_eq!(result.total_score, 100);
    assert_eq!(result.verdict, Verdict::ReadyForTest);
    assert_eq!(
        result.flags,
        vec![
            "Ready for practical test",
            "Local to Savannah area",
            "Worked at Macaljon",
        ]
    );
}

#[test]
fn tenured_generalist_is_not_dismissed() {
    let result = score(TENURED_RESUME);

    assert_eq!(result.experience_match, 20);
    assert_eq!(result.welding_process_match, 20);
    assert_eq!(result.material_experience, 15);
    assert_eq!(result.tools_fit_up_match, 5);
    assert_eq!(result.safety_inspection, 3);
    assert!(result.total_score >= 65, "total was {}", result.total_score);
    assert_ne!(result.verdict, Verdict::NotTestReady);
    assert_eq!(result.verdict, Verdict::VerifyExperience);
}

#[test]
fn mid_band_without_top_tenure_is_promising() {
    let result = score(PROMISING_RESUME);

    assert_eq!(result.experience_match, 10);
    assert_eq!(result.total_score, 71);
    assert_eq!(result.verdict, Verdict::Promising);
    assert_eq!(result.flags, vec!["Promising, needs clarification"]);
}

#[test]
fn empty_resume_scores_zero() {
    let result = score("");

    for category in Category::ordered() {
        assert_eq!(result.score_for(category), 0, "{category:?} should be zero");
    }
    assert_eq!(result.total_score, 0);
    assert_eq!(result.verdict, Verdict::NotTestReady);
    assert_eq!(result.flags, vec![Verdict::NotTestReady.label()]);
}

#[test]
fn local_employer_history_feeds_experience_and_bonus() {
    let result = score(MACALJON_RESUME);

    assert_eq!(result.experience_method, EstimateMethod::DateRanges);
    assert_eq!(result.experience_years, 6);
    assert_eq!(result.experience_match, 15);
    assert_eq!(result.local_employer_bonus, 15);
    assert_eq!(result.tools_fit_up_match, 3);
    assert_eq!(result.safety_inspection, 2);
    assert_eq!(result.total_score, 35);
    assert_eq!(result.flags, vec!["Not test-ready", "Worked at Macaljon"]);
}

#[test]
fn explicit_claim_beats_unrelated_dates() {
    let result = score(CLAIMED_TENURE_RESUME);

    assert_eq!(result.experience_method, EstimateMethod::Explicit);
    assert_eq!(result.experience_years, 15);
    assert_eq!(result.experience_match, 20);
}

#[test]
fn misspelled_local_shop_still_flags() {
    let result = score("Fitter at Coastal Weldng in Port Wentworth");

    assert_eq!(result.local_employer_bonus, 12);
    assert_eq!(
        result.flags,
        vec![
            "Not test-ready",
            "Local to Savannah area",
            "Worked at Coastal Welding",
        ]
    );
}

#[test]
fn relocation_flag_is_reported_even_without_bonus() {
    let result = score("Welder from Atlanta, willing to relocate.");

    assert_eq!(result.relocation_bonus, 0);
    assert_eq!(
        result.flags.last().map(String::as_str),
        Some("Mentions relocation")
    );
}

#[test]
fn relocation_bonus_rewards_solid_candidates() {
    let text = format!("{PROMISING_RESUME} Open to relocation.");
    let result = score(&text);

    assert_eq!(result.relocation_bonus, 5);
    assert_eq!(result.total_score, 76);
}

#[test]
fn total_is_capped_even_when_bonuses_overflow() {
    let text = format!("{STRONG_RESUME}\nCoastal Welding, JCB. Willing to relocate.");
    let result = score(&text);

    assert_eq!(result.total_score, 100);
    assert_eq!(result.local_employer_bonus, 15);
}

#[test]
fn breakdown_records_raw_and_capped_points() {
    let result = score(STRONG_RESUME);

    let certifications = result
        .breakdown
        .iter()
        .find(|score| score.category == Category::Certifications)
        .expect("certification entry");
    assert_eq!(certifications.raw_points, 20);
    assert_eq!(certifications.capped_points, 10);
    assert_eq!(result.breakdown.len(), Category::ordered().len());
}

#[test]
fn missing_text_is_rejected() {
    match engine().score_document(None) {
        Err(ScreeningError::InvalidInput(message)) => assert!(message.contains("required")),
        other => panic!("expected invalid input, got {other:?}"),
    }

    let result = engine()
        .score_document(Some(""))
        .expect("empty text is well formed");
    assert_eq!(result.total_score, 0);
}

#[test]
fn tuned_policy_moves_thresholds() {
    let config = ScreeningConfig::from_json_str(
        r#"{ "policy": { "ready_threshold": 70, "promising_threshold": 60 } }"#,
    )
    .expect("rubric parses");
    let engine = ScreeningEngine::new(config).expect("rubric is valid");

    let result = engine.score_as_of(PROMISING_RESUME, today());
    assert_eq!(result.verdict, Verdict::ReadyForTest);
}

#[test]
fn invalid_policy_is_refused() {
    let mut config = ScreeningConfig::default();
    config.policy.ready_threshold = 120;

    let error = ScreeningEngine::new(config).expect_err("unreachable threshold");
    assert!(error.to_string().contains("ready_threshold"));
}

#[test]
fn total_cap_above_the_scale_is_refused() {
    let config = ScreeningConfig::from_json_str(r#"{ "policy": { "total_cap": 150 } }"#)
        .expect("rubric parses");

    let error = ScreeningEngine::new(config).expect_err("total above 100");
    assert!(error.to_string().contains("total_cap"));
}

#[test]
fn oversized_weights_keep_the_total_in_range() {
    let mut config = ScreeningConfig::default();
    for entry in &mut config.lexicon.materials {
        entry.weight = u32::MAX;
    }
    config.policy.material_cap = u32::MAX;
    config.policy.tank_work_bonus = u32::MAX;
    config.policy.certification_cap = u32::MAX;
    let engine = ScreeningEngine::new(config).expect("rubric is valid");

    let result = engine.score_as_of("stainless and carbon storage tank, aws certified", today());
    assert_eq!(result.material_experience, u32::MAX);
    assert_eq!(result.total_score, 100);
    assert_eq!(result.verdict, Verdict::ReadyForTest);
}

#[test]
fn single_year_jobs_count_as_full_years() {
    let result = score("welder at acme 2019 - 2019\nwelder at bolt 2020 - 2020\nwelder at cog 2021 - 2021");

    assert_eq!(result.experience_method, EstimateMethod::DateRanges);
    assert_eq!(result.experience_years, 3);
    assert_eq!(result.experience_match, 10);
}

#[test]
fn short_date_ranges_fall_back_to_job_titles() {
    let result = score("welder, welder, welder helper jun 2024 - aug 2024");

    assert_eq!(result.experience_method, EstimateMethod::JobTitleMentions);
    assert_eq!(result.experience_years, 1);
    assert_eq!(result.experience_match, 5);
}

#[test]
fn scoring_is_repeatable() {
    let engine = engine();
    let first = engine.score_as_of(STRONG_RESUME, today());
    let second = engine.score_as_of(STRONG_RESUME, today());
    assert_eq!(first, second);
}
