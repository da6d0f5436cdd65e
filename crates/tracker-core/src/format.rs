/// Digit grouping and decimal separators for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    pub group: char,
    pub decimal: char,
}

impl NumberStyle {
    pub const EN: NumberStyle = NumberStyle { group: ',', decimal: '.' };

    /// Picks separators from the language part of a tag such as `de-DE`.
    /// Unknown languages use the English style.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => NumberStyle {
                group: '.',
                decimal: ',',
            },
            "fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" | "uk" => NumberStyle {
                group: ' ',
                decimal: ',',
            },
            _ => Self::EN,
        }
    }

    pub fn format(self, value: f64) -> String {
        let rounded = format!("{:.2}", value.abs());
        let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(self.group);
            }
            grouped.push(ch);
        }
        let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
        format!("{sign}{grouped}{}{frac}", self.decimal)
    }
}

/// Formats an amount with thousands separators and two decimals, e.g. `-1,234.50`.
pub fn format_money(value: f64) -> String {
    NumberStyle::EN.format(value)
}

/// Like [`format_money`] but with the separators of `locale`.
pub fn format_money_in(value: f64, locale: &str) -> String {
    NumberStyle::for_locale(locale).format(value)
}
