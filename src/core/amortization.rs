use super::error::{CalcResult, ensure_non_negative, ensure_positive_term};
use super::types::{AmortizationYear, LoanParameters, LoanSummary};

const MONTHS_PER_YEAR: u32 = 12;

/// True when `1 + r` rounds to exactly 1, so `(1 + r)^n - 1` is zero.
pub(crate) fn compounding_vanishes(rate: f64) -> bool {
    1.0 + rate == 1.0
}

/// Fixed-rate annuity payment `P·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// A rate too small to register against 1.0 (zero included) falls back to
/// straight-line repayment `P / n`, where the closed form would divide by zero.
pub fn monthly_payment(principal: f64, monthly_rate: f64, total_months: u32) -> f64 {
    if total_months == 0 {
        return principal;
    }
    if compounding_vanishes(monthly_rate) {
        return principal / total_months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(total_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Outstanding balance after `months_elapsed` scheduled payments. Zero once
/// the loan term has run out.
pub fn remaining_balance(
    principal: f64,
    monthly_rate: f64,
    total_months: u32,
    months_elapsed: u32,
) -> f64 {
    if months_elapsed >= total_months {
        return 0.0;
    }
    let balance = if compounding_vanishes(monthly_rate) {
        principal * (1.0 - months_elapsed as f64 / total_months as f64)
    } else {
        let growth_total = (1.0 + monthly_rate).powi(total_months as i32);
        let growth_elapsed = (1.0 + monthly_rate).powi(months_elapsed as i32);
        principal * (growth_total - growth_elapsed) / (growth_total - 1.0)
    };
    balance.max(0.0)
}

impl LoanParameters {
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("principal", self.principal)?;
        ensure_non_negative("annualRatePercent", self.annual_rate_percent)?;
        ensure_positive_term("termYears", self.term_years)?;
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
    }

    pub fn total_months(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(self.principal, self.monthly_rate(), self.total_months())
    }

    pub fn remaining_balance(&self, months_elapsed: u32) -> f64 {
        remaining_balance(
            self.principal,
            self.monthly_rate(),
            self.total_months(),
            months_elapsed,
        )
    }
}

/// Year-by-year interest/principal split for a home loan (EMI calculator).
pub fn amortization_schedule(loan: LoanParameters) -> CalcResult<LoanSummary> {
    loan.validate()?;

    let payment = loan.monthly_payment();
    let mut schedule = Vec::with_capacity(loan.term_years as usize);
    let mut opening_balance = loan.principal;
    let mut total_interest = 0.0;

    for year in 1..=loan.term_years {
        let closing_balance = loan.remaining_balance(year.saturating_mul(MONTHS_PER_YEAR));
        let principal_paid = opening_balance - closing_balance;
        let interest_paid = (payment * MONTHS_PER_YEAR as f64 - principal_paid).max(0.0);
        total_interest += interest_paid;
        schedule.push(AmortizationYear {
            year,
            opening_balance,
            principal_paid,
            interest_paid,
            closing_balance,
        });
        opening_balance = closing_balance;
    }

    Ok(LoanSummary {
        monthly_payment: payment,
        total_payment: payment * loan.total_months() as f64,
        total_interest,
        schedule,
    })
}
