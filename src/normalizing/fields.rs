use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::FieldError;

struct DateFormat {
    pattern: &'static str,
    separator: char,
    year_position: usize,
}

/// Tried in order, first match wins. `01/02/2023` is therefore read as
/// month/day, never day/month.
const DATE_FORMATS: [DateFormat; 4] = [
    DateFormat {
        pattern: "%Y-%m-%d",
        separator: '-',
        year_position: 0,
    },
    DateFormat {
        pattern: "%m/%d/%Y",
        separator: '/',
        year_position: 2,
    },
    DateFormat {
        pattern: "%d/%m/%Y",
        separator: '/',
        year_position: 2,
    },
    DateFormat {
        pattern: "%Y/%m/%d",
        separator: '/',
        year_position: 0,
    },
];

pub const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

impl DateFormat {
    /// Exactly three digit groups: a four digit year, one or two digits for
    /// month and day. No whitespace or signs anywhere.
    fn accepts_shape(&self, raw: &str) -> bool {
        let parts: Vec<&str> = raw.split(self.separator).collect();

        parts.len() == 3
            && parts.iter().enumerate().all(|(position, part)| {
                let width_ok = if position == self.year_position {
                    part.len() == 4
                } else {
                    (1..=2).contains(&part.len())
                };
                width_ok && part.bytes().all(|b| b.is_ascii_digit())
            })
    }

    fn parse(&self, raw: &str) -> Option<NaiveDate> {
        if !self.accepts_shape(raw) {
            return None;
        }

        NaiveDate::parse_from_str(raw, self.pattern).ok()
    }
}

/// The raw value must match a format exactly; it is not trimmed.
pub fn standardize_date(raw: &str) -> Result<NaiveDate, FieldError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| format.parse(raw))
        .ok_or_else(|| FieldError::Date(raw.to_string()))
}

/// Strips currency symbols and thousands separators, then parses what is
/// left as a signed decimal.
pub fn standardize_amount(raw: &str) -> Result<Decimal, FieldError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let cleaned = cleaned.trim();

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| FieldError::Amount(raw.to_string()))
}

pub fn standardize_text(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_date_every_supported_format() {
        assert_eq!(standardize_date("2023-01-15"), Ok(ymd(2023, 1, 15)));
        assert_eq!(standardize_date("01/15/2023"), Ok(ymd(2023, 1, 15)));
        assert_eq!(standardize_date("15/01/2023"), Ok(ymd(2023, 1, 15)));
        assert_eq!(standardize_date("2023/01/15"), Ok(ymd(2023, 1, 15)));
    }

    #[test]
    fn test_date_ambiguous_prefers_month_first() {
        assert_eq!(standardize_date("03/04/2023"), Ok(ymd(2023, 3, 4)));
        assert_eq!(standardize_date("12/11/2023"), Ok(ymd(2023, 12, 11)));
    }

    #[test]
    fn test_date_renders_iso() {
        assert_eq!(standardize_date("7/4/2024").unwrap().to_string(), "2024-07-04");
    }

    #[test]
    fn test_date_rejects_invalid_calendar_day() {
        assert_eq!(standardize_date("2023-02-30"), Err(FieldError::Date("2023-02-30".to_string())));
        assert_eq!(standardize_date("31/31/2023"), Err(FieldError::Date("31/31/2023".to_string())));
    }

    #[test]
    fn test_date_requires_four_digit_year() {
        assert_eq!(standardize_date("1/2/23"), Err(FieldError::Date("1/2/23".to_string())));
        assert_eq!(standardize_date("23-01-15"), Err(FieldError::Date("23-01-15".to_string())));
        assert_eq!(standardize_date("12023-01-15"), Err(FieldError::Date("12023-01-15".to_string())));
        assert_eq!(standardize_date("2023/1/5"), Ok(ymd(2023, 1, 5)));
    }

    #[test]
    fn test_date_rejects_surrounding_whitespace() {
        assert_eq!(standardize_date(" 2023-01-15"), Err(FieldError::Date(" 2023-01-15".to_string())));
        assert_eq!(standardize_date("2023-01-15 "), Err(FieldError::Date("2023-01-15 ".to_string())));
        assert_eq!(standardize_date("01/ 15/2023"), Err(FieldError::Date("01/ 15/2023".to_string())));
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(standardize_date("not-a-date"), Err(FieldError::Date("not-a-date".to_string())));
        assert_eq!(standardize_date(""), Err(FieldError::Date(String::new())));
        assert_eq!(standardize_date("2023-01-15 extra"), Err(FieldError::Date("2023-01-15 extra".to_string())));
    }

    #[test]
    fn test_amount_strips_symbols_and_commas() {
        assert_eq!(standardize_amount("$1,234.56"), Ok(dec!(1234.56)));
        assert_eq!(standardize_amount("£1,000,000"), Ok(dec!(1000000)));
        assert_eq!(standardize_amount(" €9.99 "), Ok(dec!(9.99)));
    }

    #[test]
    fn test_amount_negative() {
        assert_eq!(standardize_amount("€-12.00"), Ok(dec!(-12.00)));
        assert_eq!(standardize_amount("-$4.50"), Ok(dec!(-4.50)));
        assert_eq!(standardize_amount("-1,250"), Ok(dec!(-1250)));
    }

    #[test]
    fn test_amount_keeps_scale() {
        assert_eq!(standardize_amount("$4.50").unwrap().to_string(), "4.50");
    }

    #[test]
    fn test_amount_scientific_notation() {
        assert_eq!(standardize_amount("1.5e2"), Ok(dec!(150)));
    }

    #[test]
    fn test_amount_rejects_out_of_range() {
        assert_eq!(standardize_amount("1e400"), Err(FieldError::Amount("1e400".to_string())));
        assert_eq!(
            standardize_amount("123456789012345678901234567890"),
            Err(FieldError::Amount("123456789012345678901234567890".to_string()))
        );
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert_eq!(standardize_amount(""), Err(FieldError::Amount(String::new())));
        assert_eq!(standardize_amount("$"), Err(FieldError::Amount("$".to_string())));
        assert_eq!(standardize_amount("12 USD"), Err(FieldError::Amount("12 USD".to_string())));
    }

    #[test]
    fn test_text_trims_only() {
        assert_eq!(standardize_text("  Coffee Shop \t"), "Coffee Shop");
        assert_eq!(standardize_text("MiXeD case"), "MiXeD case");
        assert_eq!(standardize_text("   "), "");
    }
}
