/// Lowercases résumé text and strips the formatting noise left behind by document extraction.
///
/// Line breaks survive so date-range context can look at preceding lines.
pub fn normalize_text(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());

    for ch in raw.chars() {
        let mapped = match ch {
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '/' | '\\' | '\t' | '\r' => ' ',
            '\n' => '\n',
            c if c.is_ascii() && !c.is_ascii_control() => c.to_ascii_lowercase(),
            _ => continue,
        };
        normalized.push(mapped);
    }

    normalized
}

/// Splits normalized text into alphanumeric word tokens.
pub(crate) fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect()
}
