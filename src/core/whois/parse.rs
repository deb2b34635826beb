//! Parsing of free-form WHOIS responses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::types::WhoisValue;

const COUNTRY_KEYS: &[&str] = &["registrant country", "registrant country code", "country"];

const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Splits a response into lower-cased keys and trimmed, non-empty values.
///
/// Comment lines (`%`, `#`) and the `>>> Last update` trailer are skipped.
fn key_values(text: &str) -> impl Iterator<Item = (String, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('%') && !line.starts_with('#') && !line.starts_with(">>>"))
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let value = value.trim();
            (!value.is_empty()).then(|| (key.trim().to_ascii_lowercase(), value))
        })
}

/// Reads the registrant country from a raw answer.
///
/// Distinct values are kept in answer order; repeated ones become
/// [`WhoisValue::Many`].
pub fn country_from_raw(text: &str) -> Option<WhoisValue> {
    let mut countries: Vec<String> = Vec::new();
    for (key, value) in key_values(text) {
        if COUNTRY_KEYS.contains(&key.as_str()) && !countries.iter().any(|c| c == value) {
            countries.push(value.to_string());
        }
    }
    WhoisValue::from_values(countries)
}

/// Rewrites a WHOIS date as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Values in no known format are returned trimmed but otherwise untouched.
pub fn normalize_date(value: &str) -> String {
    let value = value.trim();
    match parse_date_string(value) {
        Some(dt) => dt.format(DATE_OUTPUT_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Attempts to parse a date string in the formats registries commonly use.
fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
    ];

    for format in &formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRAR_ANSWER: &str = "\
% Terms of use apply.
# country: ZZ
Domain Name: EXAMPLE.CO.UK
Registrant Country: GB
Admin Country: GB
Tech Country: IE
>>> Last update of whois database: 2024-10-01T12:00:00Z <<<
";

    #[test]
    fn reads_country_and_skips_comments() {
        assert_eq!(
            country_from_raw("Registrant Country: US\n"),
            Some(WhoisValue::Single("US".into()))
        );
        assert_eq!(country_from_raw("% country: ZZ\n# Country: ZZ\n"), None);
        assert_eq!(country_from_raw(""), None);
    }

    #[test]
    fn distinct_countries_become_many() {
        assert_eq!(
            country_from_raw(REGISTRAR_ANSWER),
            Some(WhoisValue::Single("GB".into()))
        );
        let text = "Registrant Country: GB\ncountry: IE\nRegistrant Country Code: GB\n";
        assert_eq!(
            country_from_raw(text),
            Some(WhoisValue::Many(vec!["GB".into(), "IE".into()]))
        );
    }

    #[test]
    fn normalizes_common_date_formats() {
        assert_eq!(normalize_date("1995-08-14T04:00:00Z"), "1995-08-14 04:00:00");
        assert_eq!(normalize_date("2024-01-15T10:30:45.123Z"), "2024-01-15 10:30:45");
        assert_eq!(normalize_date("2024-01-15T12:30:45+02:00"), "2024-01-15 10:30:45");
        assert_eq!(normalize_date("2024-01-15"), "2024-01-15 00:00:00");
        assert_eq!(normalize_date("15-Jan-2024"), "2024-01-15 00:00:00");
        assert_eq!(normalize_date("2019.03.04 12:00:00"), "2019-03-04 12:00:00");
    }

    #[test]
    fn unknown_date_formats_pass_through() {
        assert_eq!(normalize_date("  before 1996  "), "before 1996");
        assert_eq!(normalize_date(""), "");
    }
}
