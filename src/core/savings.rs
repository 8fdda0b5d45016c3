use super::amortization::compounding_vanishes;
use super::error::{CalcResult, ensure_growth_percent, ensure_non_negative, ensure_positive_term};
use super::types::{PpfParams, SavingsProjection, SipParams};

/// Value of `months` start-of-month instalments at monthly rate `r`.
fn sip_value_after(monthly_investment: f64, monthly_rate: f64, months: u32) -> f64 {
    if compounding_vanishes(monthly_rate) {
        return monthly_investment * months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    monthly_investment * (growth - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Systematic investment plan: fixed monthly instalment, compounded monthly.
pub fn project_sip(params: SipParams) -> CalcResult<SavingsProjection> {
    let monthly_investment = ensure_non_negative("monthlyInvestment", params.monthly_investment)?;
    ensure_growth_percent("expectedReturnPercent", params.expected_return_percent)?;
    let years = ensure_positive_term("years", params.years)?;

    let monthly_rate = params.expected_return_percent / 12.0 / 100.0;
    let yearly_balances: Vec<f64> = (1..=years)
        .map(|year| sip_value_after(monthly_investment, monthly_rate, year.saturating_mul(12)))
        .collect();

    let invested_amount = monthly_investment * years as f64 * 12.0;
    let maturity_value = yearly_balances.last().copied().unwrap_or(0.0);
    Ok(SavingsProjection {
        invested_amount,
        estimated_returns: maturity_value - invested_amount,
        maturity_value,
        yearly_balances,
    })
}

/// Public provident fund: one deposit at the start of each year, interest
/// credited annually.
pub fn project_ppf(params: PpfParams) -> CalcResult<SavingsProjection> {
    let yearly_investment = ensure_non_negative("yearlyInvestment", params.yearly_investment)?;
    let rate = ensure_non_negative("interestRatePercent", params.interest_rate_percent)? / 100.0;
    let years = ensure_positive_term("years", params.years)?;

    let mut balance = 0.0;
    let mut yearly_balances = Vec::with_capacity(years as usize);
    for _ in 0..years {
        balance = (balance + yearly_investment) * (1.0 + rate);
        yearly_balances.push(balance);
    }

    let invested_amount = yearly_investment * years as f64;
    Ok(SavingsProjection {
        invested_amount,
        estimated_returns: balance - invested_amount,
        maturity_value: balance,
        yearly_balances,
    })
}
