use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::core::{
    BuyVsRentParams, BuyVsRentResult, CalcError, CalcResult, DEFAULT_HORIZON_YEARS,
    LoanParameters, LoanSummary, PpfParams, RegimeComparison, SavingsProjection,
    SimulationConfig, SipParams, TaxOptions, amortization_schedule, compare_regimes, project_ppf,
    project_sip, simulate_buy_vs_rent, validate_params,
};

const DEFAULT_PROPERTY_PRICE: f64 = 5_000_000.0;
const DEFAULT_DOWN_PAYMENT: f64 = 1_000_000.0;
const DEFAULT_LOAN_TERM_YEARS: u32 = 20;
const DEFAULT_INTEREST_RATE: f64 = 8.5;
const DEFAULT_APPRECIATION: f64 = 5.0;
const DEFAULT_MAINTENANCE: f64 = 5_000.0;
const DEFAULT_PROPERTY_TAX: f64 = 10_000.0;
const DEFAULT_MONTHLY_RENT: f64 = 25_000.0;
const DEFAULT_RENT_INCREASE: f64 = 5.0;
const DEFAULT_SECURITY_DEPOSIT: f64 = 100_000.0;
const DEFAULT_INVESTMENT_RETURN: f64 = 8.0;

const DEFAULT_SIP_MONTHLY: f64 = 10_000.0;
const DEFAULT_SIP_RETURN: f64 = 12.0;
const DEFAULT_SIP_YEARS: u32 = 10;
const DEFAULT_PPF_YEARLY: f64 = 150_000.0;
const DEFAULT_PPF_RATE: f64 = 7.1;
const DEFAULT_PPF_YEARS: u32 = 15;

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "Personal finance calculators: income tax regimes, buy vs rent, home loan EMI, SIP and PPF"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Run the JSON HTTP API")]
    Serve(ServeArgs),
    #[command(about = "Compare old and new income tax regimes")]
    Tax(TaxArgs),
    #[command(about = "Project buy and rent net worth and find the breakeven year")]
    BuyVsRent(BuyVsRentArgs),
    #[command(about = "Home loan EMI and yearly amortization schedule")]
    HomeLoan(HomeLoanArgs),
    #[command(about = "Systematic investment plan projection")]
    Sip(SipArgs),
    #[command(about = "Public provident fund projection")]
    Ppf(PpfArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Bind address, overrides FINCALC_HOST")]
    pub host: Option<std::net::IpAddr>,
    #[arg(long, help = "Port, overrides FINCALC_PORT")]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct TaxArgs {
    #[arg(long, help = "Gross annual income")]
    pub income: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Total deductions (80C, 80D, etc.), used by the old regime only"
    )]
    pub deductions: f64,
    #[arg(long, help = "Add the high-income surcharge before cess")]
    pub include_surcharge: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct BuyVsRentArgs {
    #[arg(long, default_value_t = DEFAULT_PROPERTY_PRICE)]
    pub property_price: f64,
    #[arg(long, default_value_t = DEFAULT_DOWN_PAYMENT)]
    pub down_payment: f64,
    #[arg(long, default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    pub loan_term_years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_INTEREST_RATE,
        help = "Annual loan interest rate in percent"
    )]
    pub interest_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_APPRECIATION,
        help = "Annual property appreciation in percent"
    )]
    pub appreciation: f64,
    #[arg(long, default_value_t = DEFAULT_MAINTENANCE)]
    pub monthly_maintenance: f64,
    #[arg(long, default_value_t = DEFAULT_PROPERTY_TAX)]
    pub property_tax: f64,
    #[arg(long, default_value_t = DEFAULT_MONTHLY_RENT)]
    pub monthly_rent: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_RENT_INCREASE,
        help = "Annual rent increase in percent"
    )]
    pub rent_increase: f64,
    #[arg(long, default_value_t = DEFAULT_SECURITY_DEPOSIT)]
    pub security_deposit: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INVESTMENT_RETURN,
        help = "Annual return on the invested down payment in percent"
    )]
    pub investment_return: f64,
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS, help = "Years to project")]
    pub horizon_years: u32,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct HomeLoanArgs {
    #[arg(long, default_value_t = DEFAULT_PROPERTY_PRICE - DEFAULT_DOWN_PAYMENT)]
    pub loan_amount: f64,
    #[arg(long, default_value_t = DEFAULT_INTEREST_RATE, help = "Annual interest rate in percent")]
    pub interest_rate: f64,
    #[arg(long, default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    pub term_years: u32,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SipArgs {
    #[arg(long, default_value_t = DEFAULT_SIP_MONTHLY)]
    pub monthly_investment: f64,
    #[arg(long, default_value_t = DEFAULT_SIP_RETURN, help = "Expected annual return in percent")]
    pub expected_return: f64,
    #[arg(long, default_value_t = DEFAULT_SIP_YEARS)]
    pub years: u32,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PpfArgs {
    #[arg(long, default_value_t = DEFAULT_PPF_YEARLY)]
    pub yearly_investment: f64,
    #[arg(long, default_value_t = DEFAULT_PPF_RATE, help = "Annual interest rate in percent")]
    pub interest_rate: f64,
    #[arg(long, default_value_t = DEFAULT_PPF_YEARS)]
    pub years: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaxPayload {
    #[serde(alias = "annualIncome")]
    income: Option<f64>,
    deductions: Option<f64>,
    include_surcharge: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BuyVsRentPayload {
    property_price: Option<f64>,
    down_payment: Option<f64>,
    #[serde(alias = "loanTerm")]
    loan_term_years: Option<u32>,
    #[serde(alias = "annualInterestRatePercent")]
    interest_rate: Option<f64>,
    #[serde(alias = "propertyAppreciation", alias = "annualAppreciationPercent")]
    appreciation: Option<f64>,
    #[serde(alias = "maintenanceCost")]
    monthly_maintenance: Option<f64>,
    #[serde(alias = "annualPropertyTax")]
    property_tax: Option<f64>,
    monthly_rent: Option<f64>,
    #[serde(alias = "annualRentIncreasePercent")]
    rent_increase: Option<f64>,
    security_deposit: Option<f64>,
    #[serde(alias = "annualInvestmentReturnPercent")]
    investment_return: Option<f64>,
    horizon_years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HomeLoanPayload {
    #[serde(alias = "principal")]
    loan_amount: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    interest_rate: Option<f64>,
    #[serde(alias = "loanTerm")]
    term_years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SipPayload {
    monthly_investment: Option<f64>,
    expected_return: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PpfPayload {
    yearly_investment: Option<f64>,
    interest_rate: Option<f64>,
    years: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BuyVsRentResponse {
    horizon_years: u32,
    #[serde(flatten)]
    result: BuyVsRentResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn tax_options(include_surcharge: bool) -> TaxOptions {
    TaxOptions { include_surcharge }
}

fn build_buy_vs_rent(args: &BuyVsRentArgs) -> CalcResult<(BuyVsRentParams, SimulationConfig)> {
    let params = BuyVsRentParams {
        property_price: args.property_price,
        down_payment: args.down_payment,
        loan_term_years: args.loan_term_years,
        annual_interest_rate_percent: args.interest_rate,
        annual_appreciation_percent: args.appreciation,
        monthly_maintenance: args.monthly_maintenance,
        annual_property_tax: args.property_tax,
        monthly_rent: args.monthly_rent,
        annual_rent_increase_percent: args.rent_increase,
        security_deposit: args.security_deposit,
        annual_investment_return_percent: args.investment_return,
    };
    validate_params(&params)?;
    Ok((
        params,
        SimulationConfig {
            horizon_years: args.horizon_years,
        },
    ))
}

fn run_tax(args: &TaxArgs) -> CalcResult<RegimeComparison> {
    compare_regimes(args.income, args.deductions, tax_options(args.include_surcharge))
}

fn run_buy_vs_rent(args: &BuyVsRentArgs) -> CalcResult<BuyVsRentResponse> {
    let (params, config) = build_buy_vs_rent(args)?;
    let result = simulate_buy_vs_rent(&params, config)?;
    Ok(BuyVsRentResponse {
        horizon_years: config.horizon_years,
        result,
    })
}

fn run_home_loan(args: &HomeLoanArgs) -> CalcResult<LoanSummary> {
    amortization_schedule(LoanParameters {
        principal: args.loan_amount,
        annual_rate_percent: args.interest_rate,
        term_years: args.term_years,
    })
}

fn run_sip(args: &SipArgs) -> CalcResult<SavingsProjection> {
    project_sip(SipParams {
        monthly_investment: args.monthly_investment,
        expected_return_percent: args.expected_return,
        years: args.years,
    })
}

fn run_ppf(args: &PpfArgs) -> CalcResult<SavingsProjection> {
    project_ppf(PpfParams {
        yearly_investment: args.yearly_investment,
        interest_rate_percent: args.interest_rate,
        years: args.years,
    })
}

// `serve` is not a calculator and yields `None`.
pub fn run_calculator(command: &Command) -> Option<Result<String, CalcError>> {
    let rendered = match command {
        Command::Serve(_) => return None,
        Command::Tax(args) => run_tax(args).map(|r| to_pretty_json(&r)),
        Command::BuyVsRent(args) => run_buy_vs_rent(args).map(|r| to_pretty_json(&r)),
        Command::HomeLoan(args) => run_home_loan(args).map(|r| to_pretty_json(&r)),
        Command::Sip(args) => run_sip(args).map(|r| to_pretty_json(&r)),
        Command::Ppf(args) => run_ppf(args).map(|r| to_pretty_json(&r)),
    };
    Some(rendered)
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/tax", get(tax_get_handler).post(tax_post_handler))
        .route(
            "/api/buy-vs-rent",
            get(buy_vs_rent_get_handler).post(buy_vs_rent_post_handler),
        )
        .route(
            "/api/home-loan",
            get(home_loan_get_handler).post(home_loan_post_handler),
        )
        .route("/api/sip", get(sip_get_handler).post(sip_post_handler))
        .route("/api/ppf", get(ppf_get_handler).post(ppf_post_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("fincalc HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn tax_get_handler(Query(payload): Query<TaxPayload>) -> Response {
    tax_handler_impl(payload)
}

async fn tax_post_handler(Json(payload): Json<TaxPayload>) -> Response {
    tax_handler_impl(payload)
}

fn tax_handler_impl(payload: TaxPayload) -> Response {
    let args = match tax_args_from_payload(payload) {
        Ok(args) => args,
        Err(msg) => return rejected(&msg),
    };
    tracing::debug!(income = args.income, deductions = args.deductions, "tax comparison");
    respond(run_tax(&args))
}

async fn buy_vs_rent_get_handler(Query(payload): Query<BuyVsRentPayload>) -> Response {
    buy_vs_rent_handler_impl(payload)
}

async fn buy_vs_rent_post_handler(Json(payload): Json<BuyVsRentPayload>) -> Response {
    buy_vs_rent_handler_impl(payload)
}

fn buy_vs_rent_handler_impl(payload: BuyVsRentPayload) -> Response {
    let args = buy_vs_rent_args_from_payload(payload);
    tracing::debug!(
        property_price = args.property_price,
        monthly_rent = args.monthly_rent,
        horizon_years = args.horizon_years,
        "buy vs rent simulation"
    );
    respond(run_buy_vs_rent(&args))
}

async fn home_loan_get_handler(Query(payload): Query<HomeLoanPayload>) -> Response {
    home_loan_handler_impl(payload)
}

async fn home_loan_post_handler(Json(payload): Json<HomeLoanPayload>) -> Response {
    home_loan_handler_impl(payload)
}

fn home_loan_handler_impl(payload: HomeLoanPayload) -> Response {
    let args = home_loan_args_from_payload(payload);
    tracing::debug!(loan_amount = args.loan_amount, "home loan schedule");
    respond(run_home_loan(&args))
}

async fn sip_get_handler(Query(payload): Query<SipPayload>) -> Response {
    respond(run_sip(&sip_args_from_payload(payload)))
}

async fn sip_post_handler(Json(payload): Json<SipPayload>) -> Response {
    respond(run_sip(&sip_args_from_payload(payload)))
}

async fn ppf_get_handler(Query(payload): Query<PpfPayload>) -> Response {
    respond(run_ppf(&ppf_args_from_payload(payload)))
}

async fn ppf_post_handler(Json(payload): Json<PpfPayload>) -> Response {
    respond(run_ppf(&ppf_args_from_payload(payload)))
}

fn respond<T: Serialize>(result: CalcResult<T>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => rejected(&err.to_string()),
    }
}

fn rejected(msg: &str) -> Response {
    tracing::warn!("rejected calculation input: {msg}");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn tax_args_from_payload(payload: TaxPayload) -> Result<TaxArgs, String> {
    let Some(income) = payload.income else {
        return Err("income is required".to_string());
    };
    Ok(TaxArgs {
        income,
        deductions: payload.deductions.unwrap_or(0.0),
        include_surcharge: payload.include_surcharge.unwrap_or(false),
    })
}

fn default_buy_vs_rent_args() -> BuyVsRentArgs {
    BuyVsRentArgs {
        property_price: DEFAULT_PROPERTY_PRICE,
        down_payment: DEFAULT_DOWN_PAYMENT,
        loan_term_years: DEFAULT_LOAN_TERM_YEARS,
        interest_rate: DEFAULT_INTEREST_RATE,
        appreciation: DEFAULT_APPRECIATION,
        monthly_maintenance: DEFAULT_MAINTENANCE,
        property_tax: DEFAULT_PROPERTY_TAX,
        monthly_rent: DEFAULT_MONTHLY_RENT,
        rent_increase: DEFAULT_RENT_INCREASE,
        security_deposit: DEFAULT_SECURITY_DEPOSIT,
        investment_return: DEFAULT_INVESTMENT_RETURN,
        horizon_years: DEFAULT_HORIZON_YEARS,
    }
}

fn buy_vs_rent_args_from_payload(payload: BuyVsRentPayload) -> BuyVsRentArgs {
    let mut args = default_buy_vs_rent_args();

    if let Some(v) = payload.property_price {
        args.property_price = v;
    }
    if let Some(v) = payload.down_payment {
        args.down_payment = v;
    }
    if let Some(v) = payload.loan_term_years {
        args.loan_term_years = v;
    }
    if let Some(v) = payload.interest_rate {
        args.interest_rate = v;
    }
    if let Some(v) = payload.appreciation {
        args.appreciation = v;
    }
    if let Some(v) = payload.monthly_maintenance {
        args.monthly_maintenance = v;
    }
    if let Some(v) = payload.property_tax {
        args.property_tax = v;
    }
    if let Some(v) = payload.monthly_rent {
        args.monthly_rent = v;
    }
    if let Some(v) = payload.rent_increase {
        args.rent_increase = v;
    }
    if let Some(v) = payload.security_deposit {
        args.security_deposit = v;
    }
    if let Some(v) = payload.investment_return {
        args.investment_return = v;
    }
    if let Some(v) = payload.horizon_years {
        args.horizon_years = v;
    }

    args
}

fn home_loan_args_from_payload(payload: HomeLoanPayload) -> HomeLoanArgs {
    HomeLoanArgs {
        loan_amount: payload
            .loan_amount
            .unwrap_or(DEFAULT_PROPERTY_PRICE - DEFAULT_DOWN_PAYMENT),
        interest_rate: payload.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE),
        term_years: payload.term_years.unwrap_or(DEFAULT_LOAN_TERM_YEARS),
    }
}

fn sip_args_from_payload(payload: SipPayload) -> SipArgs {
    SipArgs {
        monthly_investment: payload.monthly_investment.unwrap_or(DEFAULT_SIP_MONTHLY),
        expected_return: payload.expected_return.unwrap_or(DEFAULT_SIP_RETURN),
        years: payload.years.unwrap_or(DEFAULT_SIP_YEARS),
    }
}

fn ppf_args_from_payload(payload: PpfPayload) -> PpfArgs {
    PpfArgs {
        yearly_investment: payload.yearly_investment.unwrap_or(DEFAULT_PPF_YEARLY),
        interest_rate: payload.interest_rate.unwrap_or(DEFAULT_PPF_RATE),
        years: payload.years.unwrap_or(DEFAULT_PPF_YEARS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Regime;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn buy_vs_rent_payload_parses_web_keys_and_aliases() {
        let payload: BuyVsRentPayload = serde_json::from_str(
            r#"{
                "propertyPrice": 7500000,
                "downPayment": 1500000,
                "loanTerm": 15,
                "interestRate": 9.0,
                "propertyAppreciation": 6,
                "maintenanceCost": 4000,
                "propertyTax": 12000,
                "monthlyRent": 30000,
                "rentIncrease": 4,
                "securityDeposit": 90000,
                "investmentReturn": 10,
                "horizonYears": 25
            }"#,
        )
        .expect("valid payload");
        let args = buy_vs_rent_args_from_payload(payload);

        assert_approx(args.property_price, 7_500_000.0);
        assert_approx(args.down_payment, 1_500_000.0);
        assert_eq!(args.loan_term_years, 15);
        assert_approx(args.interest_rate, 9.0);
        assert_approx(args.appreciation, 6.0);
        assert_approx(args.monthly_maintenance, 4_000.0);
        assert_approx(args.property_tax, 12_000.0);
        assert_approx(args.monthly_rent, 30_000.0);
        assert_approx(args.rent_increase, 4.0);
        assert_approx(args.security_deposit, 90_000.0);
        assert_approx(args.investment_return, 10.0);
        assert_eq!(args.horizon_years, 25);
    }

    #[test]
    fn empty_buy_vs_rent_payload_uses_calculator_defaults() {
        let payload: BuyVsRentPayload = serde_json::from_str("{}").expect("valid payload");
        assert_eq!(
            buy_vs_rent_args_from_payload(payload),
            default_buy_vs_rent_args()
        );
    }

    #[test]
    fn buy_vs_rent_response_serialization_contains_expected_fields() {
        let response = run_buy_vs_rent(&default_buy_vs_rent_args()).expect("defaults are valid");
        assert_eq!(response.result.yearly_snapshots.len(), 31);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"horizonYears\":30"));
        assert!(json.contains("\"yearlySnapshots\""));
        assert!(json.contains("\"breakevenYear\":0"));
        assert!(json.contains("\"buyTotalCost\""));
        assert!(json.contains("\"rentTotalCost\""));
        assert!(json.contains("\"buyNetWorth\""));
        assert!(json.contains("\"rentCumulativeCost\""));
    }

    #[test]
    fn buy_vs_rent_rejects_down_payment_above_price() {
        let mut args = default_buy_vs_rent_args();
        args.down_payment = args.property_price + 1.0;
        let err = run_buy_vs_rent(&args).expect_err("must reject");
        assert!(err.to_string().contains("downPayment"));
    }

    #[test]
    fn tax_payload_requires_income() {
        let payload: TaxPayload = serde_json::from_str("{}").expect("valid payload");
        let err = tax_args_from_payload(payload).expect_err("income is required");
        assert!(err.contains("income"));
    }

    #[test]
    fn tax_comparison_serializes_regimes_in_lowercase() {
        let payload: TaxPayload =
            serde_json::from_str(r#"{"annualIncome": 1000000, "deductions": 0}"#)
                .expect("valid payload");
        let comparison = run_tax(&tax_args_from_payload(payload).expect("income given"))
            .expect("valid input");
        assert_eq!(comparison.recommended_regime, Regime::New);

        let json = serde_json::to_string(&comparison).expect("comparison should serialize");
        assert!(json.contains("\"recommendedRegime\":\"new\""));
        assert!(json.contains("\"oldRegime\""));
        assert!(json.contains("\"effectiveTaxRate\""));
    }

    #[test]
    fn home_loan_payload_accepts_principal_alias() {
        let payload: HomeLoanPayload =
            serde_json::from_str(r#"{"principal": 2400000, "interestRate": 0, "termYears": 10}"#)
                .expect("valid payload");
        let summary = run_home_loan(&home_loan_args_from_payload(payload)).expect("valid loan");
        assert_approx(summary.monthly_payment, 20_000.0);
        assert_eq!(summary.schedule.len(), 10);
    }

    #[test]
    fn cli_parses_calculator_subcommands() {
        let cli = Cli::try_parse_from([
            "fincalc",
            "tax",
            "--income",
            "1200000",
            "--deductions",
            "150000",
            "--include-surcharge",
        ])
        .expect("valid command line");
        let Command::Tax(args) = &cli.command else {
            panic!("expected tax subcommand");
        };
        assert_approx(args.income, 1_200_000.0);
        assert_approx(args.deductions, 150_000.0);
        assert!(args.include_surcharge);

        let cli = Cli::try_parse_from(["fincalc", "buy-vs-rent", "--horizon-years", "10"])
            .expect("valid command line");
        let Command::BuyVsRent(args) = &cli.command else {
            panic!("expected buy-vs-rent subcommand");
        };
        let mut expected = default_buy_vs_rent_args();
        expected.horizon_years = 10;
        assert_eq!(args, &expected);
    }

    #[test]
    fn run_calculator_renders_json_and_skips_serve() {
        let cli = Cli::try_parse_from(["fincalc", "ppf", "--years", "1"]).expect("valid");
        let json = run_calculator(&cli.command)
            .expect("ppf is a calculator")
            .expect("valid input");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_approx(
            value["maturityValue"].as_f64().expect("number"),
            150_000.0 * 1.071,
        );

        let cli = Cli::try_parse_from(["fincalc", "serve", "--port", "9000"]).expect("valid");
        assert!(run_calculator(&cli.command).is_none());
        let Command::Serve(args) = &cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(args.apply(ServerConfig::default()).port, 9000);
    }

    #[test]
    fn cli_rejects_missing_income() {
        assert!(Cli::try_parse_from(["fincalc", "tax"]).is_err());
    }
}
