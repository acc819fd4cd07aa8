//! Turning record values into the strings printed on the page.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The single formatting convention used for dates and numbers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// A chrono `strftime` pattern
    pub date_format: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Printed in place of dates that are missing or cannot be read
    pub not_specified: String,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            date_format: "%B %-d, %Y".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            not_specified: "Not specified".to_string(),
        }
    }
}

/// A date as it arrives in a record: a calendar date, a timestamp, or free text that
/// hopefully holds one of the two
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl DateInput {
    /// The calendar date, taken in the timestamp's own offset
    pub fn normalize(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Date(date) => Some(*date),
            DateInput::DateTime(timestamp) => Some(timestamp.date_naive()),
            DateInput::Text(text) => parse_date_text(text.trim()),
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|timestamp| timestamp.date())
}

impl Locale {
    /// Format a date, or the "not specified" text when it is absent or unreadable
    pub fn format_date(&self, date: Option<&DateInput>) -> String {
        match date.map(|d| (d, d.normalize())) {
            Some((_, Some(date))) => date.format(&self.date_format).to_string(),
            Some((input, None)) => {
                debug!("unreadable date {input:?}, printing {:?}", self.not_specified);
                self.not_specified.clone()
            }
            None => self.not_specified.clone(),
        }
    }

    /// Group the integer digits of `value` and print `fraction_digits` decimals
    pub fn format_number(&self, value: f64, fraction_digits: usize) -> String {
        let formatted = format!("{:.*}", fraction_digits, value.abs());
        let (integer, fraction) = match formatted.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::new();
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }
        if let Some(fraction) = fraction {
            grouped.push_str(&self.decimal_separator);
            grouped.push_str(fraction);
        }

        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        if value.is_sign_negative() && !is_zero {
            format!("-{grouped}")
        } else {
            grouped
        }
    }

    /// Format an amount in an ISO 4217 currency. Known currencies get their symbol and
    /// usual number of decimals; anything else is prefixed with its code.
    /// `fraction_digits` overrides the currency's decimals.
    pub fn format_currency(
        &self,
        amount: f64,
        currency: &str,
        fraction_digits: Option<usize>,
    ) -> String {
        let code = currency.trim().to_ascii_uppercase();
        let (symbol, default_digits) = match code.as_str() {
            "USD" => (Some("$"), 2),
            "EUR" => (Some("€"), 2),
            "GBP" => (Some("£"), 2),
            "JPY" => (Some("¥"), 0),
            _ => (None, 2),
        };
        let number = self.format_number(amount.abs(), fraction_digits.unwrap_or(default_digits));
        let sign = if amount < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        match symbol {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{code} {number}"),
        }
    }
}

/// Turn an enum-like code into words: `EXPRESS_DELIVERY` becomes "Express Delivery"
pub fn humanize(code: &str) -> String {
    code.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Display names for enum-like codes, supplied by the caller. Codes without an entry
/// are humanized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    labels: BTreeMap<String, String>,
}

impl LabelCatalog {
    pub fn new<I, K, V>(labels: I) -> LabelCatalog
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        LabelCatalog {
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn label(&self, code: &str) -> String {
        self.labels
            .get(code)
            .cloned()
            .unwrap_or_else(|| humanize(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_in_long_form() {
        let locale = Locale::default();
        let date = DateInput::from("2024-03-05");
        assert_eq!(locale.format_date(Some(&date)), "March 5, 2024");
        let timestamp = DateInput::from("2024-12-31T23:30:00+02:00");
        assert_eq!(locale.format_date(Some(&timestamp)), "December 31, 2024");
        let native = DateInput::from(NaiveDate::from_ymd_opt(2023, 1, 9).expect("valid date"));
        assert_eq!(locale.format_date(Some(&native)), "January 9, 2023");
    }

    #[test]
    fn unreadable_or_missing_dates_are_not_specified() {
        let locale = Locale::default();
        assert_eq!(locale.format_date(Some(&"soon".into())), "Not specified");
        assert_eq!(locale.format_date(None), "Not specified");
    }

    #[test]
    fn deserializes_dates_from_json() {
        let dates: Vec<DateInput> =
            serde_json::from_str(r#"["2024-01-02", "2024-01-02T08:00:00Z", "tomorrow"]"#)
                .expect("valid json");
        assert!(matches!(dates[0], DateInput::Date(_)));
        assert!(matches!(dates[1], DateInput::DateTime(_)));
        assert!(matches!(dates[2], DateInput::Text(_)));
    }

    #[test]
    fn formats_currency_like_en_us() {
        let locale = Locale::default();
        assert_eq!(locale.format_currency(1234.5, "USD", None), "$1,234.50");
        assert_eq!(locale.format_currency(1234567.0, "eur", Some(0)), "€1,234,567");
        assert_eq!(locale.format_currency(1500.0, "JPY", None), "¥1,500");
        assert_eq!(locale.format_currency(99.999, "PLN", None), "PLN 100.00");
        assert_eq!(locale.format_currency(-12.0, "GBP", None), "-£12.00");
        assert_eq!(locale.format_currency(-0.001, "USD", None), "$0.00");
    }

    #[test]
    fn groups_thousands() {
        let locale = Locale::default();
        assert_eq!(locale.format_number(999.0, 0), "999");
        assert_eq!(locale.format_number(1000.0, 0), "1,000");
        assert_eq!(locale.format_number(123456.789, 1), "123,456.8");
    }

    #[test]
    fn humanizes_codes() {
        assert_eq!(humanize("EXPRESS_DELIVERY"), "Express Delivery");
        assert_eq!(humanize("cold-storage"), "Cold Storage");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn catalog_overrides_humanized_labels() {
        let catalog = LabelCatalog::new([("FTL", "Full Truck Load")]);
        assert_eq!(catalog.label("FTL"), "Full Truck Load");
        assert_eq!(catalog.label("LTL_SHARED"), "Ltl Shared");
    }
}
