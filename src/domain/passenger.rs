//! Passenger records and field validators.
//!
//! Validation follows Brazilian document rules: CPF (national ID) carries two
//! mod-11 check digits, RG (secondary ID) is free-form but must have at least
//! eight alphanumeric characters. All validators are pure functions over the
//! raw user-entered strings.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::foundation::ValidationError;

/// Minimum age, in years, for a bookable passenger.
const MIN_AGE_YEARS: u32 = 2;

/// Minimum passenger name length (characters, after trimming).
pub const MIN_NAME_LEN: usize = 3;

/// A fully collected passenger. Field values are stored as entered (CPF and
/// RG keep their punctuation); validators normalize on the fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub rg: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
}

/// A passenger under construction during the detail-collection flow.
///
/// Fields are filled one per turn in the fixed order name, RG, CPF,
/// birth date. `finish` yields a `Passenger` once all four are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassengerDraft {
    pub name: Option<String>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl PassengerDraft {
    /// Converts the draft into a passenger if every field has been collected.
    pub fn finish(self) -> Option<Passenger> {
        Some(Passenger {
            name: self.name?,
            rg: self.rg?,
            cpf: self.cpf?,
            birth_date: self.birth_date?,
        })
    }
}

/// Validates a passenger name: at least [`MIN_NAME_LEN`] characters after
/// trimming.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name",
            min: MIN_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an RG: at least eight alphanumeric characters once punctuation
/// is stripped.
pub fn validate_rg(rg: &str) -> Result<(), ValidationError> {
    let cleaned: String = rg.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.len() < 8 {
        return Err(ValidationError::invalid_format(
            "rg",
            "needs at least 8 alphanumeric characters",
        ));
    }
    Ok(())
}

/// Validates a CPF.
///
/// Strips punctuation, requires exactly 11 digits, rejects the all-equal
/// sequences (`111.111.111-11` passes the checksum but is not a valid CPF),
/// then verifies both check digits: digit 10 over digits 1-9 with weights
/// 10..2, digit 11 over digits 1-10 with weights 11..2; remainder < 2 maps
/// to 0, otherwise 11 - remainder.
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return Err(ValidationError::invalid_format("cpf", "needs 11 digits"));
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return Err(ValidationError::CpfChecksum);
    }
    if digits[9] != cpf_check_digit(&digits[..9]) || digits[10] != cpf_check_digit(&digits[..10]) {
        return Err(ValidationError::CpfChecksum);
    }
    Ok(())
}

/// Computes one CPF check digit over `digits`, weighting the first digit by
/// `digits.len() + 1` down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=start).rev())
        .map(|(d, w)| d * w)
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Validates a birth date: not in the future, and the passenger must be at
/// least [`MIN_AGE_YEARS`] years old today.
pub fn validate_birth_date(birth_date: NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    let min_age_reached = birth_date
        .checked_add_months(Months::new(MIN_AGE_YEARS * 12))
        .map(|d| d <= today)
        .unwrap_or(false);
    if birth_date > today || !min_age_reached {
        return Err(ValidationError::BirthDateOutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    mod cpf {
        use super::*;

        #[test]
        fn accepts_known_valid_cpf() {
            assert!(validate_cpf("52998224725").is_ok());
        }

        #[test]
        fn accepts_punctuated_cpf() {
            assert!(validate_cpf("529.982.247-25").is_ok());
        }

        #[test]
        fn rejects_repeated_digits() {
            assert_eq!(
                validate_cpf("11111111111"),
                Err(ValidationError::CpfChecksum)
            );
        }

        #[test]
        fn rejects_wrong_length() {
            assert!(validate_cpf("5299822472").is_err());
            assert!(validate_cpf("529982247251").is_err());
            assert!(validate_cpf("").is_err());
        }

        #[test]
        fn rejects_flipped_check_digit() {
            assert_eq!(
                validate_cpf("52998224726"),
                Err(ValidationError::CpfChecksum)
            );
        }

        proptest! {
            /// Corrupting either check digit of a valid CPF must fail
            /// validation.
            #[test]
            fn corrupted_check_digit_is_invalid(
                prefix in proptest::collection::vec(0u32..10, 9),
                bump in 1u32..10,
                which in 0usize..2,
            ) {
                prop_assume!(!prefix.iter().all(|&d| d == prefix[0]));
                let d1 = cpf_check_digit(&prefix);
                let mut digits = prefix.clone();
                digits.push(d1);
                let d2 = cpf_check_digit(&digits);
                digits.push(d2);

                digits[9 + which] = (digits[9 + which] + bump) % 10;
                let corrupted: String =
                    digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect();
                prop_assert!(validate_cpf(&corrupted).is_err());
            }
        }
    }

    mod rg {
        use super::*;

        #[test]
        fn accepts_long_enough_rg() {
            assert!(validate_rg("12.345.678-9").is_ok());
            assert!(validate_rg("123456789").is_ok());
        }

        #[test]
        fn rejects_short_rg() {
            assert!(validate_rg("1234567").is_err());
            assert!(validate_rg("1.2.3-4").is_err());
        }

        #[test]
        fn punctuation_does_not_count() {
            // 7 alphanumerics padded with separators still fails.
            assert!(validate_rg("1.2.3.4.5.6.7").is_err());
        }
    }

    mod birth_date {
        use super::*;

        #[test]
        fn rejects_future_date() {
            let tomorrow = Utc::now().date_naive() + Duration::days(1);
            assert!(validate_birth_date(tomorrow).is_err());
        }

        #[test]
        fn rejects_younger_than_two_years() {
            let one_year_ago = Utc::now().date_naive() - Duration::days(365);
            assert!(validate_birth_date(one_year_ago).is_err());
        }

        #[test]
        fn accepts_adult_birth_date() {
            let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            assert!(validate_birth_date(date).is_ok());
        }
    }

    mod draft {
        use super::*;

        #[test]
        fn finish_requires_all_fields() {
            let mut draft = PassengerDraft::default();
            assert!(draft.clone().finish().is_none());

            draft.name = Some("Maria Silva".to_string());
            draft.rg = Some("12.345.678-9".to_string());
            draft.cpf = Some("529.982.247-25".to_string());
            assert!(draft.clone().finish().is_none());

            draft.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
            let passenger = draft.finish().unwrap();
            assert_eq!(passenger.name, "Maria Silva");
        }
    }
}
