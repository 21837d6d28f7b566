//! Date parsing into the canonical `DD/MM/YYYY` representation.

use chrono::{Datelike, NaiveDate};

use super::normalize::fold_token;
use super::patterns::{DATE_COMPACT, DATE_MONTH_NAME, DATE_NUMERIC, DATE_NUMERIC_SPACED};

/// Earliest year accepted by the parser.
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by the parser.
pub const MAX_YEAR: i32 = 2100;

/// Two-digit years up to this value are read as 20YY, above it as 19YY.
const TWO_DIGIT_PIVOT: i32 = 30;

const CANONICAL_FORMAT: &str = "%d/%m/%Y";

/// Parse any supported date spelling into `DD/MM/YYYY`.
///
/// Supported: `10/05/1985`, `10.05.85`, `10-05-1985`, `10 05 1985`,
/// `10 de maio de 1985`, `10 MAI 1985`, `10/mai/1985` and compact `10051985`.
/// Returns `None` for impossible calendar dates and years outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn parse_date(text: &str) -> Option<String> {
    parse_naive(text.trim()).map(|d| d.format(CANONICAL_FORMAT).to_string())
}

/// Parse a date candidate, returning the input unchanged when it is not a date.
///
/// Used as a strategy transform: the field validator then rejects the raw
/// value instead of the strategy silently producing nothing.
pub fn parse_date_or_raw(text: &str) -> String {
    parse_date(text).unwrap_or_else(|| text.trim().to_string())
}

fn parse_naive(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_NUMERIC.captures(text) {
        if let Some(date) = build_date(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_NUMERIC_SPACED.captures(text) {
        if let Some(date) = build_date(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_MONTH_NAME.captures(text) {
        if let Some(month) = month_from_name(&caps[2]) {
            if let Some(date) = build_date(&caps[1], &month.to_string(), &caps[3]) {
                return Some(date);
            }
        }
    }

    if let Some(caps) = DATE_COMPACT.captures(text) {
        return build_date(&caps[1], &caps[2], &caps[3]);
    }

    None
}

fn build_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year = parse_year(year)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        if year <= TWO_DIGIT_PIVOT {
            Some(2000 + year)
        } else {
            Some(1900 + year)
        }
    } else {
        Some(year)
    }
}

/// Map a Portuguese month name or three-letter abbreviation to its number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let folded = fold_token(name);
    let month = match folded.as_str() {
        "JANEIRO" | "JAN" => 1,
        "FEVEREIRO" | "FEV" => 2,
        "MARCO" | "MAR" => 3,
        "ABRIL" | "ABR" => 4,
        "MAIO" | "MAI" => 5,
        "JUNHO" | "JUN" => 6,
        "JULHO" | "JUL" => 7,
        "AGOSTO" | "AGO" => 8,
        "SETEMBRO" | "SET" => 9,
        "OUTUBRO" | "OUT" => 10,
        "NOVEMBRO" | "NOV" => 11,
        "DEZEMBRO" | "DEZ" => 12,
        _ => return None,
    };
    Some(month)
}

/// Year of a canonical `DD/MM/YYYY` date.
pub fn date_year(canonical: &str) -> Option<i32> {
    NaiveDate::parse_from_str(canonical.trim(), CANONICAL_FORMAT)
        .ok()
        .map(|d| d.year())
}

/// Chronological ordering key for a canonical date.
pub fn date_sort_key(canonical: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(canonical.trim(), CANONICAL_FORMAT).ok()
}

/// Whether `value` is a canonical date whose year lies in `min..=max`.
pub fn is_date_in_range(value: &str, min: i32, max: i32) -> bool {
    let value = value.trim();
    // Canonical form is exactly DD/MM/YYYY; chrono alone accepts `1/5/1985`.
    if value.len() != 10 {
        return false;
    }
    date_year(value).is_some_and(|year| (min..=max).contains(&year))
}

/// All dates found in `text`, canonicalized, in order of first appearance.
///
/// Compact `DDMMYYYY` runs are not scanned for: bare 8-digit numbers are far
/// more often identity or postal numbers.
pub fn find_dates(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, NaiveDate)> = Vec::new();

    for caps in DATE_NUMERIC.captures_iter(text) {
        if let (Some(m), Some(date)) = (caps.get(0), build_date(&caps[1], &caps[2], &caps[3])) {
            found.push((m.start(), date));
        }
    }

    for caps in DATE_NUMERIC_SPACED.captures_iter(text) {
        if let (Some(m), Some(date)) = (caps.get(0), build_date(&caps[1], &caps[2], &caps[3])) {
            found.push((m.start(), date));
        }
    }

    for caps in DATE_MONTH_NAME.captures_iter(text) {
        let date = month_from_name(&caps[2])
            .and_then(|month| build_date(&caps[1], &month.to_string(), &caps[3]));
        if let (Some(m), Some(date)) = (caps.get(0), date) {
            found.push((m.start(), date));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);

    let mut dates: Vec<String> = Vec::new();
    for (_, date) in found {
        let canonical = date.format(CANONICAL_FORMAT).to_string();
        if !dates.contains(&canonical) {
            dates.push(canonical);
        }
    }
    dates
}

fn dates_in_range(text: &str, min: i32, max: i32) -> Vec<NaiveDate> {
    find_dates(text)
        .iter()
        .filter_map(|d| NaiveDate::parse_from_str(d, CANONICAL_FORMAT).ok())
        .filter(|d| (min..=max).contains(&d.year()))
        .collect()
}

/// The oldest date in `text` whose year lies in `min..=max`.
pub fn find_oldest_date_in_range(text: &str, min: i32, max: i32) -> Option<String> {
    dates_in_range(text, min, max)
        .into_iter()
        .min()
        .map(|d| d.format(CANONICAL_FORMAT).to_string())
}

/// The most recent date in `text` whose year lies in `min..=max`.
pub fn find_latest_date_in_range(text: &str, min: i32, max: i32) -> Option<String> {
    dates_in_range(text, min, max)
        .into_iter()
        .max()
        .map(|d| d.format(CANONICAL_FORMAT).to_string())
}
