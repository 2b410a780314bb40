//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Normalize free text into lowercase word tokens separated by single
/// spaces, with one leading and one trailing space.
///
/// Punctuation becomes a separator; apostrophes inside words are kept
/// (`let's`), and typographic apostrophes are folded to ASCII. Phrase
/// lookups of the form `" {phrase} "` therefore only match whole words.
pub fn word_tokens(text: &str) -> String {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();

    let mut normalized = String::with_capacity(cleaned.len() + 2);
    normalized.push(' ');
    for token in cleaned.split_whitespace() {
        let token = token.trim_matches('\'');
        if token.is_empty() {
            continue;
        }
        normalized.push_str(token);
        normalized.push(' ');
    }
    normalized
}

/// Whether `tokens` (output of [`word_tokens`]) contains `phrase` as whole words
pub fn contains_phrase(tokens: &str, phrase: &str) -> bool {
    tokens.contains(&format!(" {} ", phrase))
}

/// Round to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an amount as dollars with thousands separators: `$1,234.50`
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // '€' is 3 bytes, cutting at 4 backs up to 3
        let s = "€€€";
        assert_eq!(truncate_str(s, 4), "€");
        assert_eq!(truncate_str(s, 6), "€€");
    }

    #[test]
    fn word_tokens_strip_punctuation() {
        assert_eq!(word_tokens("Split $1,200 -- NOW!"), " split 1 200 now ");
        assert_eq!(word_tokens("  "), " ");
        assert_eq!(word_tokens("'quoted' let\u{2019}s"), " quoted let's ");
    }

    #[test]
    fn contains_phrase_is_whole_word() {
        let tokens = word_tokens("see you in April");
        assert!(contains_phrase(&tokens, "april"));
        assert!(!contains_phrase(&tokens, "apr"));
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(40.0), "$40.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-12.5), "-$12.50");
    }

    #[test]
    fn cents_rounding() {
        assert_eq!(round_cents(40.004), 40.0);
        assert_eq!(round_cents(45.999), 46.0);
    }
}
