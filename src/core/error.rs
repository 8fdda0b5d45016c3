pub type CalcResult<T> = std::result::Result<T, CalcError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite { field })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be >= 0",
        });
    }
    Ok(value)
}

/// Growth rates in percent may be negative but never wipe out the whole balance.
pub(crate) fn ensure_growth_percent(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value <= -100.0 {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be > -100",
        });
    }
    Ok(value)
}

/// Longest loan, savings or simulation span accepted, in years.
pub const MAX_YEARS: u32 = 100;

pub(crate) fn ensure_positive_term(field: &'static str, value: u32) -> CalcResult<u32> {
    if value == 0 {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be > 0",
        });
    }
    ensure_at_most_max_years(field, value)
}

pub(crate) fn ensure_at_most_max_years(field: &'static str, value: u32) -> CalcResult<u32> {
    if value > MAX_YEARS {
        return Err(CalcError::InvalidInput {
            field,
            reason: "must be <= 100",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_are_rejected() {
        let err = ensure_non_negative("income", f64::NAN).expect_err("NaN must be rejected");
        assert_eq!(err, CalcError::NonFinite { field: "income" });
        assert!(ensure_finite("income", f64::INFINITY).is_err());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ensure_non_negative("deductions", -1.0).expect_err("negative must be rejected");
        assert_eq!(err.to_string(), "deductions must be >= 0");

        let err = ensure_growth_percent("rentIncrease", -100.0).expect_err("-100% is rejected");
        assert_eq!(err.to_string(), "rentIncrease must be > -100");
    }

    #[test]
    fn zero_term_is_rejected() {
        assert!(ensure_positive_term("loanTermYears", 0).is_err());
        assert_eq!(ensure_positive_term("loanTermYears", 20), Ok(20));
    }

    #[test]
    fn year_counts_are_capped() {
        assert_eq!(ensure_positive_term("years", MAX_YEARS), Ok(MAX_YEARS));
        assert_eq!(ensure_at_most_max_years("horizonYears", 0), Ok(0));
        for value in [MAX_YEARS + 1, 400_000_000, u32::MAX] {
            let err = ensure_positive_term("years", value).expect_err("oversized term");
            assert_eq!(
                err,
                CalcError::InvalidInput {
                    field: "years",
                    reason: "must be <= 100"
                }
            );
            assert!(ensure_at_most_max_years("horizonYears", value).is_err());
        }
    }
}
