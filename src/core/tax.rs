use super::error::{CalcResult, ensure_non_negative};
use super::types::{
    NEW_REGIME_SLABS, OLD_REGIME_SLABS, Regime, RegimeComparison, TaxInput, TaxOptions, TaxResult,
    TaxSlab,
};

/// Health and education cess charged on tax plus surcharge.
pub const CESS_RATE: f64 = 0.04;

/// `(exclusive income threshold, rate)`, highest bracket first.
pub const SURCHARGE_BRACKETS: &[(f64, f64)] = &[
    (50_000_000.0, 0.37),
    (20_000_000.0, 0.25),
    (10_000_000.0, 0.15),
    (5_000_000.0, 0.10),
];

#[derive(Debug, Clone, Copy)]
struct RegimeRules {
    slabs: &'static [TaxSlab],
    standard_deduction: f64,
    honours_deductions: bool,
    rebate_income_limit: f64,
    rebate_cap: f64,
}

const OLD_RULES: RegimeRules = RegimeRules {
    slabs: OLD_REGIME_SLABS,
    standard_deduction: 0.0,
    honours_deductions: true,
    rebate_income_limit: 500_000.0,
    rebate_cap: 12_500.0,
};

const NEW_RULES: RegimeRules = RegimeRules {
    slabs: NEW_REGIME_SLABS,
    standard_deduction: 50_000.0,
    honours_deductions: false,
    rebate_income_limit: 700_000.0,
    rebate_cap: 25_000.0,
};

fn rules_for(regime: Regime) -> &'static RegimeRules {
    match regime {
        Regime::Old => &OLD_RULES,
        Regime::New => &NEW_RULES,
    }
}

pub fn slabs_for(regime: Regime) -> &'static [TaxSlab] {
    rules_for(regime).slabs
}

#[derive(Debug, Clone, Copy)]
struct Assessment {
    taxable_income: f64,
    slab_tax: f64,
    rebate: f64,
}

impl Assessment {
    fn basic_tax(self) -> f64 {
        (self.slab_tax - self.rebate).max(0.0)
    }
}

/// Progressive tax over an ascending, gap-free slab table. Negative income is
/// treated as zero.
pub fn compute_slab_tax(taxable_income: f64, slabs: &[TaxSlab]) -> f64 {
    let income = taxable_income.max(0.0);
    let mut tax = 0.0;
    for slab in slabs {
        if income <= slab.lower_bound {
            break;
        }
        let top = slab.upper_bound.map_or(income, |upper| income.min(upper));
        tax += (top - slab.lower_bound) * slab.rate;
    }
    tax
}

fn assess(regime: Regime, income: f64, deductions: f64) -> Assessment {
    let rules = rules_for(regime);
    let allowed_deductions = if rules.honours_deductions {
        deductions
    } else {
        0.0
    };
    let taxable_income = (income - rules.standard_deduction - allowed_deductions).max(0.0);
    let slab_tax = compute_slab_tax(taxable_income, rules.slabs);
    // Section 87A rebate.
    let rebate = if taxable_income <= rules.rebate_income_limit {
        slab_tax.min(rules.rebate_cap)
    } else {
        0.0
    };
    Assessment {
        taxable_income,
        slab_tax,
        rebate,
    }
}

/// Tax under the old regime after deductions and the section 87A rebate,
/// before surcharge and cess.
pub fn tax_old_regime(income: f64, deductions: f64) -> CalcResult<f64> {
    let income = ensure_non_negative("income", income)?;
    let deductions = ensure_non_negative("deductions", deductions)?;
    Ok(assess(Regime::Old, income, deductions).basic_tax())
}

/// Tax under the new regime after the standard deduction and the section 87A
/// rebate, before surcharge and cess. Itemised deductions do not apply.
pub fn tax_new_regime(income: f64) -> CalcResult<f64> {
    let income = ensure_non_negative("income", income)?;
    Ok(assess(Regime::New, income, 0.0).basic_tax())
}

fn surcharge_rate(income: f64) -> f64 {
    SURCHARGE_BRACKETS
        .iter()
        .find(|(threshold, _)| income > *threshold)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0)
}

pub fn compute_surcharge(income: f64, basic_tax: f64) -> CalcResult<f64> {
    let income = ensure_non_negative("income", income)?;
    let basic_tax = ensure_non_negative("basicTax", basic_tax)?;
    Ok(basic_tax * surcharge_rate(income))
}

pub fn compute_cess(amount: f64) -> CalcResult<f64> {
    let amount = ensure_non_negative("amount", amount)?;
    Ok(amount * CESS_RATE)
}

/// Basic tax plus surcharge plus cess on both.
pub fn compute_total_tax(income: f64, basic_tax: f64) -> CalcResult<f64> {
    let surcharge = compute_surcharge(income, basic_tax)?;
    let cess = compute_cess(basic_tax + surcharge)?;
    Ok(basic_tax + surcharge + cess)
}

/// Full breakdown for one regime. The surcharge bracket is picked from gross
/// annual income.
pub fn compute_tax(input: TaxInput, options: TaxOptions) -> CalcResult<TaxResult> {
    let income = ensure_non_negative("annualIncome", input.annual_income)?;
    let deductions = ensure_non_negative("deductions", input.deductions)?;

    let assessment = assess(input.regime, income, deductions);
    let after_rebate = assessment.basic_tax();
    let surcharge = if options.include_surcharge {
        after_rebate * surcharge_rate(income)
    } else {
        0.0
    };
    let cess = (after_rebate + surcharge) * CESS_RATE;
    let total_tax = after_rebate + surcharge + cess;
    let effective_tax_rate = if income > 0.0 {
        total_tax / income * 100.0
    } else {
        0.0
    };

    Ok(TaxResult {
        regime: input.regime,
        taxable_income: assessment.taxable_income,
        basic_tax: assessment.slab_tax,
        rebate: assessment.rebate,
        surcharge,
        cess,
        total_tax,
        effective_tax_rate,
    })
}

/// Computes both regimes for the same earner and recommends the cheaper one.
/// Ties go to the old regime.
pub fn compare_regimes(
    income: f64,
    deductions: f64,
    options: TaxOptions,
) -> CalcResult<RegimeComparison> {
    let old_regime = compute_tax(
        TaxInput {
            annual_income: income,
            deductions,
            regime: Regime::Old,
        },
        options,
    )?;
    let new_regime = compute_tax(
        TaxInput {
            annual_income: income,
            deductions,
            regime: Regime::New,
        },
        options,
    )?;

    let recommended_regime = if old_regime.total_tax <= new_regime.total_tax {
        Regime::Old
    } else {
        Regime::New
    };

    Ok(RegimeComparison {
        old_regime,
        new_regime,
        recommended_regime,
        savings: (old_regime.total_tax - new_regime.total_tax).abs(),
    })
}
