//! Keyword-table category suggestions and parsing of spoken entries.

use once_cell::sync::Lazy;
use regex::Regex;

pub const FALLBACK_CATEGORY: &str = "General";

/// Brand names checked before the generic keyword rules, in order.
const BRANDS: &[(&str, &str)] = &[
    ("dominos", "Food"),
    ("mcdonald", "Food"),
    ("pizza", "Food"),
    ("starbucks", "Food"),
    ("flipkart", "Shopping"),
    ("amazon", "Shopping"),
    ("netflix", "Entertainment"),
    ("paytm", "Bills"),
];

const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["salary", "pay"], "Salary"),
    (&["uber", "ola", "taxi", "bus", "metro", "train"], "Transport"),
    (
        &["grocery", "grocer", "supermarket", "dmart", "bigbasket"],
        "Food",
    ),
    (&["rent", "apartment", "house"], "Bills"),
    (&["subscription", "netflix", "spotify", "prime"], "Entertainment"),
    (&["amazon", "flipkart", "mall", "shop"], "Shopping"),
    (&["doctor", "hospital", "pharmacy", "clinic"], "Health"),
];

static BILL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bbill\b").expect("valid regex"));
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+(\.\d+)?").expect("valid regex"));

/// Suggests a category for free text; the first matching rule wins.
pub fn suggest_category(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }
    let text = text.to_lowercase();
    if let Some((_, category)) = BRANDS.iter().find(|(brand, _)| text.contains(brand)) {
        return Some(category);
    }
    if let Some((_, category)) = KEYWORD_RULES
        .iter()
        .find(|(words, _)| words.iter().any(|w| text.contains(w)))
    {
        return Some(category);
    }
    BILL_WORD.is_match(&text).then_some("Bills")
}

/// A transaction sketch recovered from a transcript such as `"grocery 80"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenEntry {
    pub name: String,
    pub amount: Option<f64>,
    pub category: String,
}

pub fn parse_spoken_entry(transcript: &str) -> SpokenEntry {
    let transcript = transcript.trim();
    let found = AMOUNT.find(transcript);
    let amount = found.and_then(|m| m.as_str().parse::<f64>().ok());
    let name = match found {
        Some(m) => format!("{}{}", &transcript[..m.start()], &transcript[m.end()..]),
        None => transcript.to_string(),
    }
    .trim()
    .to_string();
    let category = suggest_category(&name)
        .unwrap_or(FALLBACK_CATEGORY)
        .to_string();
    SpokenEntry {
        name,
        amount,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brands_win_over_keyword_rules() {
        // "pay" would match Salary, but the brand table is consulted first.
        assert_eq!(suggest_category("Paytm recharge"), Some("Bills"));
        assert_eq!(suggest_category("Amazon Prime"), Some("Shopping"));
        assert_eq!(suggest_category("Netflix"), Some("Entertainment"));
    }

    #[test]
    fn keyword_rules_in_order() {
        assert_eq!(suggest_category("Monthly salary"), Some("Salary"));
        assert_eq!(suggest_category("Metro card"), Some("Transport"));
        assert_eq!(suggest_category("BigBasket order"), Some("Food"));
        assert_eq!(suggest_category("Spotify"), Some("Entertainment"));
        assert_eq!(suggest_category("Pharmacy"), Some("Health"));
    }

    #[test]
    fn bill_requires_whole_word() {
        assert_eq!(suggest_category("electric bill"), Some("Bills"));
        assert_eq!(suggest_category("billiards"), None);
        assert_eq!(suggest_category(""), None);
    }

    #[test]
    fn spoken_entry_extracts_amount_and_category() {
        let entry = parse_spoken_entry("grocery 80.5");
        assert_eq!(entry.name, "grocery");
        assert_eq!(entry.amount, Some(80.5));
        assert_eq!(entry.category, "Food");

        let entry = parse_spoken_entry("recharge");
        assert_eq!(entry.amount, None);
        assert_eq!(entry.category, FALLBACK_CATEGORY);
    }
}
