use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::config::ScoringPolicy;
use super::dates::{self, DateSpan};
use super::lexicon::Lexicon;

static EXPLICIT_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("explicit years pattern compiles")
});

/// Which rule produced the experience estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateMethod {
    Explicit,
    DateRanges,
    JobTitleMentions,
    None,
}

impl EstimateMethod {
    pub const fn label(self) -> &'static str {
        match self {
            EstimateMethod::Explicit => "explicit statement",
            EstimateMethod::DateRanges => "date ranges",
            EstimateMethod::JobTitleMentions => "job title mentions",
            EstimateMethod::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEstimate {
    pub years: u32,
    pub method: EstimateMethod,
    /// Merged trade-relevant spans when the estimate came from date ranges.
    pub spans: Vec<DateSpan>,
}

impl ExperienceEstimate {
    fn none() -> Self {
        Self {
            years: 0,
            method: EstimateMethod::None,
            spans: Vec::new(),
        }
    }
}

/// Best-effort years of relevant experience. The first rule that produces a value wins:
/// an explicit "N years" claim, then trade-corroborated date ranges, then job title mentions.
pub fn estimate_experience(
    text: &str,
    lexicon: &Lexicon,
    policy: &ScoringPolicy,
    today: NaiveDate,
) -> ExperienceEstimate {
    if let Some(years) = explicit_years(text) {
        return ExperienceEstimate {
            years,
            method: EstimateMethod::Explicit,
            spans: Vec::new(),
        };
    }

    if let Some(estimate) = years_from_date_ranges(text, lexicon, policy, today) {
        return estimate;
    }

    let mentions: usize = lexicon
        .job_titles
        .iter()
        .filter(|title| !title.is_empty())
        .map(|title| text.matches(title.as_str()).count())
        .sum();
    if mentions >= policy.job_title_min_mentions {
        return ExperienceEstimate {
            years: policy.job_title_proxy_years,
            method: EstimateMethod::JobTitleMentions,
            spans: Vec::new(),
        };
    }

    ExperienceEstimate::none()
}

/// Largest "N years" / "N+ yrs" claim in the text.
fn explicit_years(text: &str) -> Option<u32> {
    EXPLICIT_YEARS_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

fn years_from_date_ranges(
    text: &str,
    lexicon: &Lexicon,
    policy: &ScoringPolicy,
    today: NaiveDate,
) -> Option<ExperienceEstimate> {
    let relevant: Vec<DateSpan> = dates::find_spans(
        text,
        today,
        policy.context_window_chars,
        policy.context_preceding_lines,
    )
    .into_iter()
    .filter(|span| {
        lexicon
            .trade_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && span.context.contains(keyword.as_str()))
    })
    .collect();

    if relevant.is_empty() {
        return None;
    }

    let spans = dates::merge_spans(relevant);
    let months = spans
        .iter()
        .map(DateSpan::months)
        .fold(0, u32::saturating_add);
    let years = (months.saturating_add(6) / 12).min(policy.max_years_from_dates);

    tracing::trace!(spans = spans.len(), months, years, "experience from date ranges");

    // Under six months rounds to nothing; leave room for the job title proxy.
    if years == 0 {
        return None;
    }

    Some(ExperienceEstimate {
        years,
        method: EstimateMethod::DateRanges,
        spans,
    })
}
