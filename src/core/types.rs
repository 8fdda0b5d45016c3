use serde::{Deserialize, Serialize};

/// Number of years the buy-vs-rent projection covers unless a caller asks otherwise.
pub const DEFAULT_HORIZON_YEARS: u32 = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    #[serde(alias = "OLD", alias = "Old")]
    Old,
    #[serde(alias = "NEW", alias = "New")]
    New,
}

/// One marginal-rate bracket. `upper_bound: None` marks the open-ended top slab.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlab {
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl TaxSlab {
    const fn new(lower_bound: f64, upper_bound: Option<f64>, rate: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }
}

pub const OLD_REGIME_SLABS: &[TaxSlab] = &[
    TaxSlab::new(0.0, Some(250_000.0), 0.0),
    TaxSlab::new(250_000.0, Some(500_000.0), 0.05),
    TaxSlab::new(500_000.0, Some(1_000_000.0), 0.20),
    TaxSlab::new(1_000_000.0, None, 0.30),
];

pub const NEW_REGIME_SLABS: &[TaxSlab] = &[
    TaxSlab::new(0.0, Some(300_000.0), 0.0),
    TaxSlab::new(300_000.0, Some(600_000.0), 0.05),
    TaxSlab::new(600_000.0, Some(900_000.0), 0.10),
    TaxSlab::new(900_000.0, Some(1_200_000.0), 0.15),
    TaxSlab::new(1_200_000.0, Some(1_500_000.0), 0.20),
    TaxSlab::new(1_500_000.0, None, 0.30),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxInput {
    pub annual_income: f64,
    pub deductions: f64,
    pub regime: Regime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxOptions {
    /// Surcharge is left out of the regime comparison unless this is set.
    pub include_surcharge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub regime: Regime,
    pub taxable_income: f64,
    pub basic_tax: f64,
    pub rebate: f64,
    pub surcharge: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub effective_tax_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old_regime: TaxResult,
    pub new_regime: TaxResult,
    pub recommended_regime: Regime,
    pub savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationYear>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyVsRentParams {
    pub property_price: f64,
    pub down_payment: f64,
    pub loan_term_years: u32,
    pub annual_interest_rate_percent: f64,
    pub annual_appreciation_percent: f64,
    pub monthly_maintenance: f64,
    pub annual_property_tax: f64,
    pub monthly_rent: f64,
    pub annual_rent_increase_percent: f64,
    pub security_deposit: f64,
    pub annual_investment_return_percent: f64,
}

impl BuyVsRentParams {
    pub fn loan_amount(&self) -> f64 {
        self.property_price - self.down_payment
    }

    pub fn loan(&self) -> LoanParameters {
        LoanParameters {
            principal: self.loan_amount(),
            annual_rate_percent: self.annual_interest_rate_percent,
            term_years: self.loan_term_years,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub horizon_years: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySnapshot {
    pub year: u32,
    pub buy_cumulative_cost: f64,
    pub rent_cumulative_cost: f64,
    pub buy_net_worth: f64,
    pub rent_net_worth: f64,
    pub property_value: f64,
    pub remaining_loan: f64,
    pub invested_capital: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyVsRentResult {
    pub monthly_payment: f64,
    pub yearly_snapshots: Vec<YearlySnapshot>,
    pub buy_total_cost: f64,
    pub rent_total_cost: f64,
    pub breakeven_year: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipParams {
    pub monthly_investment: f64,
    pub expected_return_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PpfParams {
    pub yearly_investment: f64,
    pub interest_rate_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProjection {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub maturity_value: f64,
    pub yearly_balances: Vec<f64>,
}
