use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let date = format!(
        r"(?:{MONTH}\.?,?\s*(?:19|20)\d{{2}}|(?:0?[1-9]|1[0-2])[ .](?:19|20)\d{{2}}|(?:19|20)\d{{2}})"
    );
    let pattern = format!(
        r"\b(?P<start>{date})\s*(?:-+|to|through|thru|until)\s*(?P<end>{date}|present|current|now|today)\b"
    );
    Regex::new(&pattern).expect("date range pattern compiles")
});

const EARLIEST_YEAR: i32 = 1950;

/// Calendar month counted from year zero, so spans reduce to integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthStamp(i32);

impl MonthStamp {
    pub fn new(year: i32, month: u32) -> Self {
        Self(year * 12 + month as i32 - 1)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn year(self) -> i32 {
        self.0.div_euclid(12)
    }

    pub fn month(self) -> u32 {
        (self.0.rem_euclid(12) + 1) as u32
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn months_until(self, end: MonthStamp) -> u32 {
        (end.0 - self.0).max(0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DatePoint {
    year: i32,
    month: u32,
    precision: Precision,
}

/// A date range found in the text together with the text around it.
///
/// `end` is exclusive: a range through March ends at April, and a bare end year
/// runs through December.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: MonthStamp,
    pub end: MonthStamp,
    pub ongoing: bool,
    pub context: String,
}

impl DateSpan {
    pub fn months(&self) -> u32 {
        self.start.months_until(self.end)
    }
}

/// Every well-formed date range in `text`. Fragments that fail to parse are skipped.
pub(crate) fn find_spans(
    text: &str,
    today: NaiveDate,
    window_chars: usize,
    preceding_lines: usize,
) -> Vec<DateSpan> {
    RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let start = parse_point(caps.name("start")?.as_str(), today)?;
            let end_token = caps.name("end")?.as_str();

            let (end, ongoing) = match end_token {
                "present" | "current" | "now" | "today" => {
                    (MonthStamp::from_date(today).next(), true)
                }
                token => {
                    let point = parse_point(token, today)?;
                    let stamp = MonthStamp::new(point.year, point.month);
                    match point.precision {
                        Precision::Month => (stamp.next(), false),
                        Precision::Year => (MonthStamp::new(point.year + 1, 1), false),
                    }
                }
            };

            let start = MonthStamp::new(start.year, start.month);
            if end <= start {
                return None;
            }

            let context = context_around(text, whole.start(), whole.end(), window_chars, preceding_lines);
            Some(DateSpan {
                start,
                end,
                ongoing,
                context,
            })
        })
        .collect()
}

/// Collapse overlapping spans so concurrent jobs are not counted twice.
pub(crate) fn merge_spans(mut spans: Vec<DateSpan>) -> Vec<DateSpan> {
    spans.sort_by_key(|span| (span.start, span.end));

    let mut merged: Vec<DateSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start < last.end => {
                if span.end > last.end {
                    last.end = span.end;
                    last.ongoing = span.ongoing;
                }
                last.context.push('\n');
                last.context.push_str(&span.context);
            }
            _ => merged.push(span),
        }
    }
    merged
}

fn parse_point(token: &str, today: NaiveDate) -> Option<DatePoint> {
    let token = token.trim();
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    let year: i32 = digits.get(digits.len().checked_sub(4)?..)?.parse().ok()?;
    if !(EARLIEST_YEAR..=today.year() + 1).contains(&year) {
        return None;
    }

    let first = token.chars().next()?;
    if first.is_ascii_alphabetic() {
        let name: String = token.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        return Some(DatePoint {
            year,
            month: month_from_name(&name)?,
            precision: Precision::Month,
        });
    }

    match token.split_once([' ', '.']) {
        Some((month, _)) => {
            let month: u32 = month.parse().ok()?;
            (1..=12).contains(&month).then_some(DatePoint {
                year,
                month,
                precision: Precision::Month,
            })
        }
        None => Some(DatePoint {
            year,
            month: 1,
            precision: Precision::Year,
        }),
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn context_around(
    text: &str,
    start: usize,
    end: usize,
    window_chars: usize,
    preceding_lines: usize,
) -> String {
    let window_start = floor_boundary(text, start.saturating_sub(window_chars));
    let window_end = floor_boundary(text, end.saturating_add(window_chars).min(text.len()));
    let mut context = text[window_start..window_end].to_string();

    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if line_start > 0 && preceding_lines > 0 {
        let earlier = text[..line_start - 1]
            .rsplit('\n')
            .take(preceding_lines)
            .collect::<Vec<_>>();
        for line in earlier.into_iter().rev() {
            context.push('\n');
            context.push_str(line);
        }
    }

    context
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
