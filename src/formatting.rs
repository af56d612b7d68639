//! Pure functions that turn raw values into display strings.
//!
//! None of these functions fail. Malformed input renders as a fixed default
//! (`"$0.00"`, `"0%"`, `"0"`, `""` or `"Invalid Date"`) so display code never
//! has to handle an error.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    clock::{Clock, SystemClock},
};

/// The currency used when the caller has no preference.
pub const DEFAULT_CURRENCY: &str = "USD";

/// The number of decimal places used when the caller has no preference.
pub const DEFAULT_PERCENTAGE_DECIMALS: usize = 1;

/// Appended to text cut short by [truncate_text].
pub const DEFAULT_TRUNCATION_SUFFIX: &str = "...";

/// Rendered in place of a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

// ============================================================================
// NUMBERS
// ============================================================================

/// Format `amount` as money in the currency with the ISO 4217 code `currency_code`.
///
/// The amount is rounded to two decimal places, the whole part is grouped
/// with commas and negative amounts put the minus sign before the symbol,
/// e.g. `-$1,234.50`. NaN and infinite amounts render as zero. Codes that
/// are not three ASCII letters are treated as [DEFAULT_CURRENCY].
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let prefix = currency_prefix(currency_code);

    let rounded = FixedDecimal::round(amount, 2);
    // Amounts that round to zero never get a minus sign.
    let sign = if rounded.negative && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let whole = group_thousands(&rounded.whole);

    format!("{sign}{prefix}{whole}.{}", rounded.fraction)
}

fn currency_prefix(currency_code: &str) -> String {
    let code = if currency_code.len() == 3 && currency_code.bytes().all(|b| b.is_ascii_alphabetic())
    {
        currency_code.to_ascii_uppercase()
    } else {
        tracing::debug!("Unrecognised currency code {currency_code:?}, using {DEFAULT_CURRENCY}");
        DEFAULT_CURRENCY.to_owned()
    };

    let symbol = match code.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "TWD" => "NT$",
        // en-US renders other currencies as the code and a non-breaking space.
        _ => return format!("{code}\u{a0}"),
    };

    symbol.to_owned()
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}

/// numfmt writes values from 10^12 upwards in exponent notation.
const GROUPING_FORMATTER_LIMIT: u64 = 1_000_000_000_000;

/// Insert a comma between every group of three digits in a string of digits.
fn group_thousands(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(whole) if whole < GROUPING_FORMATTER_LIMIT => {
            get_thousands_separator_formatter().fmt_string(whole)
        }
        _ => {
            let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

            for (i, digit) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(digit);
            }

            grouped
        }
    }
}

/// Enough fractional digits to write any finite f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// A finite f64 rounded to a fixed number of decimal places.
///
/// Rounding works on the exact decimal value of the f64 and sends ties away
/// from zero. `1.25` rounds to `1.3` while `1.115`, stored as
/// `1.11499999...`, rounds to `1.11`.
#[derive(Debug)]
struct FixedDecimal {
    negative: bool,
    whole: String,
    fraction: String,
}

impl FixedDecimal {
    fn round(value: f64, decimals: usize) -> Self {
        let exact = format!(
            "{:.*}",
            EXACT_FRACTION_DIGITS.max(decimals + 1),
            value.abs()
        );
        let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

        let mut digits: Vec<u8> = whole
            .bytes()
            .chain(fraction.bytes().take(decimals))
            .collect();
        let mut whole_len = whole.len();

        if fraction.as_bytes().get(decimals).is_some_and(|&d| d >= b'5') {
            let mut carry = true;

            for digit in digits.iter_mut().rev() {
                if *digit == b'9' {
                    *digit = b'0';
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }

            if carry {
                digits.insert(0, b'1');
                whole_len += 1;
            }
        }

        let (whole, fraction) = digits.split_at(whole_len);

        Self {
            negative: value < 0.0,
            whole: String::from_utf8_lossy(whole).into_owned(),
            fraction: String::from_utf8_lossy(fraction).into_owned(),
        }
    }

    fn is_zero(&self) -> bool {
        self.whole.bytes().chain(self.fraction.bytes()).all(|d| d == b'0')
    }
}

impl std::fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }

        f.write_str(&self.whole)?;

        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }

        Ok(())
    }
}

/// Format a ratio as a percentage, e.g. `0.5` becomes `"50.0%"` with one decimal.
///
/// Ties round away from zero. NaN and infinite values render as `"0%"`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0%".to_owned();
    }

    format!("{}%", FixedDecimal::round(value * 100.0, decimals))
}

/// Abbreviate large magnitudes with a K, M or B suffix and one decimal place.
///
/// Numbers below one thousand are rendered in full. Ties round away from
/// zero, so 1250 is `"1.3K"`. NaN and infinite values render as `"0"`.
pub fn format_large_number(num: f64) -> String {
    if !num.is_finite() {
        return "0".to_owned();
    }

    let sign = if num < 0.0 { "-" } else { "" };
    let magnitude = num.abs();

    if magnitude >= 1e9 {
        format!("{sign}{}B", FixedDecimal::round(magnitude / 1e9, 1))
    } else if magnitude >= 1e6 {
        format!("{sign}{}M", FixedDecimal::round(magnitude / 1e6, 1))
    } else if magnitude >= 1e3 {
        format!("{sign}{}K", FixedDecimal::round(magnitude / 1e3, 1))
    } else {
        format!("{sign}{magnitude}")
    }
}

// ============================================================================
// DATES
// ============================================================================

/// How much of a date to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// Month and day, e.g. "Dec 25".
    Short,
    /// Month, day and year, e.g. "Dec 25, 2023".
    #[default]
    Medium,
    /// Weekday, month, day and year, e.g. "Monday, December 25, 2023".
    Long,
}

impl DateStyle {
    /// Parse "short", "medium" or "long". Any other name gives [DateStyle::Medium].
    pub fn from_name(name: &str) -> Self {
        match name {
            "short" => Self::Short,
            "long" => Self::Long,
            _ => Self::Medium,
        }
    }

    fn format_items(&self) -> &'static [BorrowedFormatItem<'static>] {
        match self {
            Self::Short => SHORT_DATE_FORMAT,
            Self::Medium => MEDIUM_DATE_FORMAT,
            Self::Long => LONG_DATE_FORMAT,
        }
    }
}

const SHORT_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none]");

const MEDIUM_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");

/// Date only format used for input, e.g. "2023-12-25".
const DATE_INPUT_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A date handed to the date formatters.
///
/// Display code often holds dates as text or not at all, so the formatters
/// accept all three and decide how to render each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    /// No date. Renders as an empty string.
    Missing,
    /// A known instant.
    Instant(OffsetDateTime),
    /// Text to be parsed with [parse_date].
    Text(&'a str),
}

impl DateInput<'_> {
    fn resolve(self) -> Option<Result<OffsetDateTime, Error>> {
        match self {
            Self::Missing => None,
            Self::Instant(date_time) => Some(Ok(date_time)),
            Self::Text(text) => Some(parse_date(text)),
        }
    }
}

impl From<OffsetDateTime> for DateInput<'_> {
    fn from(date_time: OffsetDateTime) -> Self {
        Self::Instant(date_time)
    }
}

impl From<Date> for DateInput<'_> {
    fn from(date: Date) -> Self {
        Self::Instant(date.midnight().assume_utc())
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        if text.is_empty() {
            Self::Missing
        } else {
            Self::Text(text)
        }
    }
}

impl<'a, T> From<Option<T>> for DateInput<'a>
where
    T: Into<DateInput<'a>>,
{
    fn from(maybe_date: Option<T>) -> Self {
        maybe_date.map_or(Self::Missing, Into::into)
    }
}

/// Parse an RFC 3339 date-time, e.g. "2023-12-25T12:00:00Z", or a plain date,
/// e.g. "2023-12-25", which is taken as midnight UTC.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is in neither format.
pub fn parse_date(text: &str) -> Result<OffsetDateTime, Error> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time);
    }

    Date::parse(text, DATE_INPUT_FORMAT)
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Format a date in the US English style selected by `style`.
///
/// Dates are shown in their own UTC offset. A missing date renders as an
/// empty string and unparseable text renders as [INVALID_DATE].
pub fn format_date<'a>(date: impl Into<DateInput<'a>>, style: DateStyle) -> String {
    match date.into().resolve() {
        None => String::new(),
        Some(Ok(date_time)) => date_time
            .format(style.format_items())
            .unwrap_or_else(|_| INVALID_DATE.to_owned()),
        Some(Err(_)) => INVALID_DATE.to_owned(),
    }
}

/// Describe how long ago `date` was, relative to the system clock.
///
/// See [format_relative_time_at].
pub fn format_relative_time<'a>(date: impl Into<DateInput<'a>>) -> String {
    format_relative_time_at(date, SystemClock.now())
}

/// Describe how long ago `date` was, relative to `now`.
///
/// | Elapsed           | Output                  |
/// |-------------------|-------------------------|
/// | under a minute    | "Just now"              |
/// | under an hour     | "1 minute ago", "N minutes ago" |
/// | under a day       | "1 hour ago", "N hours ago" |
/// | one day           | "Yesterday"             |
/// | two to six days   | "N days ago"            |
/// | a week or more    | the [DateStyle::Medium] date |
///
/// Exactly one minute reads "1 minute ago". Earlier releases said "Just now"
/// until two minutes had passed, and that was changed on purpose.
///
/// Dates after `now` render as "Just now". A missing date renders as an
/// empty string and unparseable text renders as [INVALID_DATE].
pub fn format_relative_time_at<'a>(date: impl Into<DateInput<'a>>, now: OffsetDateTime) -> String {
    let date_time = match date.into().resolve() {
        None => return String::new(),
        Some(Err(_)) => return INVALID_DATE.to_owned(),
        Some(Ok(date_time)) => date_time,
    };

    let elapsed = now - date_time;

    if elapsed.is_negative() {
        return "Just now".to_owned();
    }

    match elapsed.whole_days() {
        0 => match elapsed.whole_hours() {
            0 => match elapsed.whole_minutes() {
                0 => "Just now".to_owned(),
                1 => "1 minute ago".to_owned(),
                minutes => format!("{minutes} minutes ago"),
            },
            1 => "1 hour ago".to_owned(),
            hours => format!("{hours} hours ago"),
        },
        1 => "Yesterday".to_owned(),
        days @ 2..=6 => format!("{days} days ago"),
        _ => format_date(date_time, DateStyle::Medium),
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Upper-case the first letter of each word and lower-case the rest.
///
/// A word starts at the first letter, digit or underscore after whitespace,
/// so leading punctuation such as "(" is left alone.
pub fn capitalize_words(text: &str) -> String {
    let mut capitalized = String::with_capacity(text.len());
    let mut in_word = false;

    for character in text.chars() {
        if character.is_whitespace() {
            in_word = false;
            capitalized.push(character);
        } else if in_word {
            capitalized.extend(character.to_lowercase());
        } else if character.is_alphanumeric() || character == '_' {
            in_word = true;
            capitalized.extend(character.to_uppercase());
        } else {
            capitalized.push(character);
        }
    }

    capitalized
}

/// Shorten `text` to at most `max_length` graphemes, ending with `suffix`.
///
/// Text that already fits is returned unchanged. If `suffix` is longer than
/// `max_length` the result is just `suffix`.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.graphemes(true).count() <= max_length {
        return text.to_owned();
    }

    let keep = max_length.saturating_sub(suffix.graphemes(true).count());
    let truncated: String = text.graphemes(true).take(keep).collect();

    truncated + suffix
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod currency_tests {
    use crate::formatting::format_currency;

    #[test]
    fn formats_valid_amounts() {
        assert_eq!(format_currency(100.0, "USD"), "$100.00");
        assert_eq!(format_currency(99.99, "USD"), "$99.99");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(4.5, "USD"), "$4.50");
    }

    #[test]
    fn puts_minus_sign_before_symbol() {
        assert_eq!(format_currency(-50.25, "USD"), "-$50.25");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(-1234567.891, "USD"), "-$1,234,567.89");
    }

    #[test]
    fn groups_amounts_beyond_trillions() {
        assert_eq!(format_currency(1e12, "USD"), "$1,000,000,000,000.00");
        assert_eq!(
            format_currency(1e16, "USD"),
            "$10,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(-1.5e17, "USD"),
            "-$150,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(1e21, "USD"),
            "$1,000,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn rounds_the_stored_value_of_the_amount() {
        // 1.115 is stored as 1.11499999...
        assert_eq!(format_currency(1.115, "USD"), "$1.11");
        assert_eq!(format_currency(0.125, "USD"), "$0.13");
        assert_eq!(format_currency(-0.125, "USD"), "-$0.13");
        assert_eq!(format_currency(999.995, "USD"), "$1,000.00");
    }

    #[test]
    fn invalid_amounts_render_as_zero() {
        assert_eq!(format_currency(f64::NAN, "USD"), "$0.00");
        assert_eq!(format_currency(f64::INFINITY, "USD"), "$0.00");
        assert_eq!(format_currency(f64::NAN, "EUR"), "€0.00");
    }

    #[test]
    fn tiny_negative_amounts_have_no_sign() {
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
        assert_eq!(format_currency(-0.0, "USD"), "$0.00");
    }

    #[test]
    fn formats_other_currencies() {
        assert_eq!(format_currency(100.0, "EUR"), "€100.00");
        assert_eq!(format_currency(100.0, "GBP"), "£100.00");
        assert_eq!(format_currency(100.0, "gbp"), "£100.00");
        assert_eq!(format_currency(100.0, "CHF"), "CHF\u{a0}100.00");
    }

    #[test]
    fn malformed_currency_code_falls_back_to_usd() {
        assert_eq!(format_currency(100.0, "dollars"), "$100.00");
        assert_eq!(format_currency(100.0, ""), "$100.00");
    }
}

#[cfg(test)]
mod number_tests {
    use crate::formatting::{format_large_number, format_percentage};

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percentage(0.5, 1), "50.0%");
        assert_eq!(format_percentage(0.75, 1), "75.0%");
        assert_eq!(format_percentage(1.0, 1), "100.0%");
        assert_eq!(format_percentage(0.0, 1), "0.0%");
    }

    #[test]
    fn percentages_respect_decimals() {
        assert_eq!(format_percentage(0.12345, 2), "12.35%");
        assert_eq!(format_percentage(0.12345, 0), "12%");
    }

    #[test]
    fn percentage_ties_round_away_from_zero() {
        assert_eq!(format_percentage(0.125, 0), "13%");
        assert_eq!(format_percentage(0.005, 1), "0.5%");
        assert_eq!(format_percentage(0.9999, 1), "100.0%");
    }

    #[test]
    fn invalid_percentages_render_as_zero() {
        assert_eq!(format_percentage(f64::NAN, 1), "0%");
        assert_eq!(format_percentage(f64::NEG_INFINITY, 1), "0%");
    }

    #[test]
    fn negative_zero_percentage_has_no_sign() {
        assert_eq!(format_percentage(-0.0, 1), "0.0%");
    }

    #[test]
    fn abbreviates_large_numbers() {
        assert_eq!(format_large_number(1500.0), "1.5K");
        assert_eq!(format_large_number(1500000.0), "1.5M");
        assert_eq!(format_large_number(1500000000.0), "1.5B");
        assert_eq!(format_large_number(500.0), "500");
        assert_eq!(format_large_number(1000.0), "1.0K");
    }

    #[test]
    fn abbreviation_ties_round_away_from_zero() {
        assert_eq!(format_large_number(1250.0), "1.3K");
        assert_eq!(format_large_number(2250.0), "2.3K");
        assert_eq!(format_large_number(1_250_000.0), "1.3M");
        assert_eq!(format_large_number(-2250.0), "-2.3K");
        assert_eq!(format_large_number(999_950.0), "1000.0K");
    }

    #[test]
    fn abbreviation_keeps_sign() {
        assert_eq!(format_large_number(-1500.0), "-1.5K");
        assert_eq!(format_large_number(-1500000.0), "-1.5M");
        assert_eq!(format_large_number(-12.5), "-12.5");
    }

    #[test]
    fn invalid_large_numbers_render_as_zero() {
        assert_eq!(format_large_number(f64::NAN), "0");
        assert_eq!(format_large_number(f64::INFINITY), "0");
    }
}
