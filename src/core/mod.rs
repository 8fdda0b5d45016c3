mod amortization;
mod engine;
mod error;
mod savings;
mod tax;
mod types;

pub use amortization::{amortization_schedule, monthly_payment, remaining_balance};
pub use engine::{find_breakeven_year, simulate_buy_vs_rent, validate_params};
pub use error::{CalcError, CalcResult, MAX_YEARS};
pub use savings::{project_ppf, project_sip};
pub use tax::{
    CESS_RATE, SURCHARGE_BRACKETS, compare_regimes, compute_cess, compute_slab_tax,
    compute_surcharge, compute_tax, compute_total_tax, slabs_for, tax_new_regime, tax_old_regime,
};
pub use types::{
    AmortizationYear, BuyVsRentParams, BuyVsRentResult, DEFAULT_HORIZON_YEARS, LoanParameters,
    LoanSummary, NEW_REGIME_SLABS, OLD_REGIME_SLABS, PpfParams, Regime, RegimeComparison,
    SavingsProjection, SimulationConfig, SipParams, TaxInput, TaxOptions, TaxResult, TaxSlab,
    YearlySnapshot,
};
