//! Regex extractors over free-text messages.
//!
//! Pulls the structured tokens the dialogue needs out of Portuguese text:
//! a `de <origem> para <destino> em <data>` search phrase, a flight-number
//! code, bare integers, and strictly-formatted `dd/mm/yyyy` dates.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ORIGIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)de\s+([A-Za-zÀ-ÿ\s]+?)(?:\s+para\s+|$)").unwrap()
});

static DESTINATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)para\s+([A-Za-zÀ-ÿ\s]+?)(?:\s+em\s+|$)").unwrap()
});

// The long form ("15 de julho de 2025") is recognized so the phrase still
// scans, but only the numeric form is parsed into a date.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"em\s+(\d{1,2}/\d{1,2}/\d{4})|(\d{1,2}\s+de\s+\p{L}+\s+de\s+\d{4})").unwrap()
});

static FLIGHT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([a-z]{2}\d{3,5})\b").unwrap());

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d+)\b").unwrap());

static BR_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());

/// The parsed parameters of a flight-search phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
}

/// Extracts origin, destination and date from a search phrase.
///
/// All three parts must be present and the date must parse; a partial match
/// returns `None` so the caller re-prompts instead of searching on
/// incomplete criteria.
pub fn extract_search_params(message: &str) -> Option<SearchParams> {
    let origin = ORIGIN_RE
        .captures(message)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())?;
    let destination = DESTINATION_RE
        .captures(message)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())?;
    let date = DATE_RE
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_br_date(m.as_str()))?;

    Some(SearchParams {
        origin,
        destination,
        date,
    })
}

/// Extracts a flight-number token (two letters, 3-5 digits), normalized to
/// upper case.
pub fn extract_flight_number(message: &str) -> Option<String> {
    FLIGHT_NUMBER_RE
        .captures(message)
        .map(|c| c[1].to_uppercase())
}

/// Extracts the first bare integer token from a message.
pub fn extract_integer(message: &str) -> Option<i64> {
    INTEGER_RE.captures(message).and_then(|c| c[1].parse().ok())
}

/// Strictly parses a `dd/mm/yyyy` date. The whole (trimmed) input must be
/// the date; calendar-invalid dates return `None`.
pub fn parse_br_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if !BR_DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod search_params {
        use super::*;

        #[test]
        fn extracts_full_phrase() {
            let params =
                extract_search_params("de São Paulo para Rio de Janeiro em 28/05/2025").unwrap();
            assert_eq!(params.origin, "São Paulo");
            assert_eq!(params.destination, "Rio de Janeiro");
            assert_eq!(params.date, NaiveDate::from_ymd_opt(2025, 5, 28).unwrap());
        }

        #[test]
        fn missing_date_is_invalid() {
            assert!(extract_search_params("de São Paulo para Rio de Janeiro").is_none());
        }

        #[test]
        fn missing_origin_is_invalid() {
            assert!(extract_search_params("para Lisboa em 15/07/2025").is_none());
        }

        #[test]
        fn long_form_date_is_recognized_but_not_parsed() {
            // Spelled-out dates scan as a date token but never yield
            // parseable params, so the whole phrase stays invalid.
            assert!(
                extract_search_params("de Porto para Lisboa em 15 de julho de 2025").is_none()
            );
        }

        #[test]
        fn calendar_invalid_date_is_rejected() {
            assert!(extract_search_params("de GRU para LIS em 32/05/2025").is_none());
        }
    }

    mod flight_number {
        use super::*;

        #[test]
        fn extracts_and_uppercases() {
            assert_eq!(
                extract_flight_number("quero reservar o voo az101"),
                Some("AZ101".to_string())
            );
        }

        #[test]
        fn accepts_four_digit_codes() {
            assert_eq!(
                extract_flight_number("GO3404 por favor"),
                Some("GO3404".to_string())
            );
        }

        #[test]
        fn accepts_five_digit_codes() {
            assert_eq!(
                extract_flight_number("GO34094"),
                Some("GO34094".to_string())
            );
        }

        #[test]
        fn rejects_malformed_codes() {
            assert_eq!(extract_flight_number("voo A101"), None);
            assert_eq!(extract_flight_number("voo ABC12"), None);
            assert_eq!(extract_flight_number("voo GO340941"), None);
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn parses_padded_and_unpadded() {
            assert_eq!(
                parse_br_date("28/05/2025"),
                NaiveDate::from_ymd_opt(2025, 5, 28)
            );
            assert_eq!(parse_br_date("5/7/2025"), NaiveDate::from_ymd_opt(2025, 7, 5));
        }

        #[test]
        fn rejects_trailing_text() {
            assert_eq!(parse_br_date("28/05/2025 por favor"), None);
        }

        #[test]
        fn rejects_iso_format() {
            assert_eq!(parse_br_date("2025-05-28"), None);
        }
    }

    #[test]
    fn extracts_leading_integer() {
        assert_eq!(extract_integer("3"), Some(3));
        assert_eq!(extract_integer("somos 4 pessoas"), Some(4));
        assert_eq!(extract_integer("nenhum"), None);
    }
}
