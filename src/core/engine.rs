use super::error::{
    CalcError, CalcResult, ensure_at_most_max_years, ensure_growth_percent, ensure_non_negative,
    ensure_positive_term,
};
use super::types::{
    BuyVsRentParams, BuyVsRentResult, LoanParameters, SimulationConfig, YearlySnapshot,
};

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
struct BuyState {
    cumulative_cost: f64,
    property_value: f64,
    remaining_loan: f64,
}

impl BuyState {
    fn net_worth(self) -> f64 {
        self.property_value - self.remaining_loan
    }
}

#[derive(Debug, Clone, Copy)]
struct RentState {
    cumulative_cost: f64,
    invested_capital: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rates {
    appreciation: f64,
    rent_increase: f64,
    investment_return: f64,
}

impl Rates {
    fn from_params(params: &BuyVsRentParams) -> Self {
        Self {
            appreciation: params.annual_appreciation_percent / 100.0,
            rent_increase: params.annual_rent_increase_percent / 100.0,
            investment_return: params.annual_investment_return_percent / 100.0,
        }
    }
}

pub fn validate_params(params: &BuyVsRentParams) -> CalcResult<()> {
    ensure_non_negative("propertyPrice", params.property_price)?;
    ensure_non_negative("downPayment", params.down_payment)?;
    if params.down_payment > params.property_price {
        return Err(CalcError::InvalidInput {
            field: "downPayment",
            reason: "cannot exceed propertyPrice",
        });
    }
    ensure_positive_term("loanTermYears", params.loan_term_years)?;
    ensure_non_negative(
        "annualInterestRatePercent",
        params.annual_interest_rate_percent,
    )?;
    ensure_growth_percent(
        "annualAppreciationPercent",
        params.annual_appreciation_percent,
    )?;
    ensure_non_negative("monthlyMaintenance", params.monthly_maintenance)?;
    ensure_non_negative("annualPropertyTax", params.annual_property_tax)?;
    ensure_non_negative("monthlyRent", params.monthly_rent)?;
    ensure_growth_percent(
        "annualRentIncreasePercent",
        params.annual_rent_increase_percent,
    )?;
    ensure_non_negative("securityDeposit", params.security_deposit)?;
    ensure_growth_percent(
        "annualInvestmentReturnPercent",
        params.annual_investment_return_percent,
    )?;
    Ok(())
}

// Extra savings trickle in over the year, so they earn half a year of return.
fn half_year_growth_factor(annual_return: f64) -> f64 {
    1.0 + annual_return / 2.0
}

pub fn simulate_buy_vs_rent(
    params: &BuyVsRentParams,
    config: SimulationConfig,
) -> CalcResult<BuyVsRentResult> {
    validate_params(params)?;
    ensure_at_most_max_years("horizonYears", config.horizon_years)?;

    let loan = params.loan();
    let monthly_payment = loan.monthly_payment();
    let rates = Rates::from_params(params);

    let mut buy = BuyState {
        cumulative_cost: params.down_payment,
        property_value: params.property_price,
        remaining_loan: loan.principal,
    };
    let mut rent = RentState {
        cumulative_cost: params.security_deposit,
        invested_capital: params.down_payment,
    };

    let mut snapshots = Vec::with_capacity(config.horizon_years as usize + 1);
    // Year 0 nets the down payment against the full property price.
    snapshots.push(YearlySnapshot {
        year: 0,
        buy_cumulative_cost: buy.cumulative_cost,
        rent_cumulative_cost: rent.cumulative_cost,
        buy_net_worth: params.property_price - params.down_payment,
        rent_net_worth: -params.security_deposit,
        property_value: buy.property_value,
        remaining_loan: buy.remaining_loan,
        invested_capital: rent.invested_capital,
    });

    for year in 1..=config.horizon_years {
        step_buy_year(params, &loan, &rates, year, &mut buy);
        step_rent_year(params, &rates, monthly_payment, year, &mut rent);

        snapshots.push(YearlySnapshot {
            year,
            buy_cumulative_cost: buy.cumulative_cost,
            rent_cumulative_cost: rent.cumulative_cost,
            buy_net_worth: buy.net_worth(),
            rent_net_worth: rent.invested_capital - params.security_deposit,
            property_value: buy.property_value,
            remaining_loan: buy.remaining_loan,
            invested_capital: rent.invested_capital,
        });
    }

    let breakeven_year = find_breakeven_year(&snapshots);

    Ok(BuyVsRentResult {
        monthly_payment,
        buy_total_cost: buy.cumulative_cost,
        rent_total_cost: rent.cumulative_cost,
        breakeven_year,
        yearly_snapshots: snapshots,
    })
}

fn step_buy_year(
    params: &BuyVsRentParams,
    loan: &LoanParameters,
    rates: &Rates,
    year: u32,
    buy: &mut BuyState,
) {
    buy.property_value = params.property_price * (1.0 + rates.appreciation).powi(year as i32);

    let yearly_mortgage = if year <= params.loan_term_years {
        loan.monthly_payment() * MONTHS_PER_YEAR
    } else {
        0.0
    };
    let yearly_maintenance = params.monthly_maintenance * MONTHS_PER_YEAR;
    buy.cumulative_cost += yearly_mortgage + yearly_maintenance + params.annual_property_tax;

    buy.remaining_loan = loan.remaining_balance(year.saturating_mul(MONTHS_PER_YEAR as u32));
}

fn step_rent_year(
    params: &BuyVsRentParams,
    rates: &Rates,
    monthly_payment: f64,
    year: u32,
    rent: &mut RentState,
) {
    let current_monthly_rent =
        params.monthly_rent * (1.0 + rates.rent_increase).powi(year as i32 - 1);
    rent.cumulative_cost += current_monthly_rent * MONTHS_PER_YEAR;

    rent.invested_capital *= 1.0 + rates.investment_return;

    // Compared against the contractual payment even after the loan is repaid.
    if current_monthly_rent < monthly_payment {
        let additional = (monthly_payment - current_monthly_rent) * MONTHS_PER_YEAR;
        rent.invested_capital += additional * half_year_growth_factor(rates.investment_return);
    }
}

pub fn find_breakeven_year(snapshots: &[YearlySnapshot]) -> Option<u32> {
    snapshots
        .iter()
        .find(|snapshot| snapshot.buy_net_worth > snapshot.rent_net_worth)
        .map(|snapshot| snapshot.year)
}
