//! Quarterly period records and the accounts they carry.
//!
//! A [`PeriodRecord`] is one (company, fiscal year, quarter) row. Raw account
//! figures are fixed when the record is created; derived ratios and growth
//! fields are filled in afterwards by the metrics crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accounts extracted from every reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    /// Total assets (자산총계)
    TotalAssets,
    /// Total liabilities (부채총계)
    TotalLiabilities,
    /// Total equity (자본총계)
    TotalEquity,
    /// Revenue (매출액)
    Revenue,
    /// Operating income (영업이익)
    OperatingIncome,
    /// Net income (당기순이익)
    NetIncome,
}

impl Account {
    /// Every extracted account, in output column order.
    pub const ALL: [Self; 6] = [
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::TotalEquity,
        Self::Revenue,
        Self::OperatingIncome,
        Self::NetIncome,
    ];

    /// Account name as reported by OpenDART (`account_nm`).
    pub const fn dart_name(&self) -> &'static str {
        match self {
            Self::TotalAssets => "자산총계",
            Self::TotalLiabilities => "부채총계",
            Self::TotalEquity => "자본총계",
            Self::Revenue => "매출액",
            Self::OperatingIncome => "영업이익",
            Self::NetIncome => "당기순이익",
        }
    }

    /// Look up the account matching an OpenDART account name.
    pub fn from_dart_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.dart_name() == name.trim())
    }

    /// Snake-case identifier used in exports and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::TotalEquity => "total_equity",
            Self::Revenue => "revenue",
            Self::OperatingIncome => "operating_income",
            Self::NetIncome => "net_income",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// First quarter report
    Q1,
    /// Half-year report
    Q2,
    /// Third quarter report
    Q3,
    /// Annual business report
    Q4,
}

impl Quarter {
    /// All quarters in fiscal order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Quarter number, 1 through 4.
    pub const fn number(&self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Quarter from its number (1 through 4).
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// OpenDART report code (`reprt_code`) for this quarter's filing.
    pub const fn report_code(&self) -> &'static str {
        match self {
            Self::Q1 => "11013",
            Self::Q2 => "11012",
            Self::Q3 => "11014",
            Self::Q4 => "11011",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// A (fiscal year, quarter) pair. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Fiscal year
    pub year: i32,
    /// Fiscal quarter
    pub quarter: Quarter,
}

impl FiscalPeriod {
    /// Create a new fiscal period.
    pub const fn new(year: i32, quarter: Quarter) -> Self {
        Self { year, quarter }
    }

    /// The period immediately after this one; Q4 wraps to Q1 of the next year.
    pub const fn next(&self) -> Self {
        match self.quarter {
            Quarter::Q1 => Self::new(self.year, Quarter::Q2),
            Quarter::Q2 => Self::new(self.year, Quarter::Q3),
            Quarter::Q3 => Self::new(self.year, Quarter::Q4),
            Quarter::Q4 => Self::new(self.year + 1, Quarter::Q1),
        }
    }

    /// Running quarter count; consecutive periods differ by exactly one.
    pub const fn ordinal(&self) -> i64 {
        self.year as i64 * 4 + self.quarter.number() as i64 - 1
    }

    /// Quarters from `earlier` to this period, negative when `earlier` is later.
    pub const fn quarters_since(&self, earlier: Self) -> i64 {
        self.ordinal() - earlier.ordinal()
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

/// Every period of an inclusive year range, in chronological order.
pub fn fiscal_periods(start_year: i32, end_year: i32) -> impl Iterator<Item = FiscalPeriod> {
    (start_year..=end_year)
        .flat_map(|year| Quarter::ALL.into_iter().map(move |q| FiscalPeriod::new(year, q)))
}

/// Whether a row holds reported figures or projected ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Figures reported by the company
    Actual,
    /// Figures produced by the forecaster
    Forecast,
}

impl RowKind {
    /// Lowercase label used in exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Forecast => "forecast",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw account figures of one period. `None` means not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Figures {
    /// Total assets
    pub total_assets: Option<f64>,
    /// Total liabilities
    pub total_liabilities: Option<f64>,
    /// Total equity
    pub total_equity: Option<f64>,
    /// Revenue
    pub revenue: Option<f64>,
    /// Operating income
    pub operating_income: Option<f64>,
    /// Net income
    pub net_income: Option<f64>,
}

impl Figures {
    /// Value of a single account.
    pub const fn get(&self, account: Account) -> Option<f64> {
        match account {
            Account::TotalAssets => self.total_assets,
            Account::TotalLiabilities => self.total_liabilities,
            Account::TotalEquity => self.total_equity,
            Account::Revenue => self.revenue,
            Account::OperatingIncome => self.operating_income,
            Account::NetIncome => self.net_income,
        }
    }

    /// Replace the value of a single account.
    pub const fn set(&mut self, account: Account, value: Option<f64>) {
        match account {
            Account::TotalAssets => self.total_assets = value,
            Account::TotalLiabilities => self.total_liabilities = value,
            Account::TotalEquity => self.total_equity = value,
            Account::Revenue => self.revenue = value,
            Account::OperatingIncome => self.operating_income = value,
            Account::NetIncome => self.net_income = value,
        }
    }

    /// True when no account has a value.
    pub fn is_empty(&self) -> bool {
        Account::ALL.iter().all(|a| self.get(*a).is_none())
    }
}

/// Qualitative profit label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitStatus {
    /// Net income strictly positive
    Surplus,
    /// Net income zero, negative or unknown
    Deficit,
}

impl ProfitStatus {
    /// Lowercase label used in exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Surplus => "surplus",
            Self::Deficit => "deficit",
        }
    }
}

impl fmt::Display for ProfitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived ratios. Percentages except `operating_cost`, which is an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    /// Operating income / revenue (%)
    pub operating_margin: Option<f64>,
    /// Net income / revenue (%)
    pub net_margin: Option<f64>,
    /// Net income / total assets (%)
    pub roa: Option<f64>,
    /// Net income / total equity (%)
    pub roe: Option<f64>,
    /// Revenue - operating income
    pub operating_cost: Option<f64>,
    /// Operating cost / revenue (%)
    pub operating_cost_ratio: Option<f64>,
    /// Surplus or deficit
    pub profit_status: Option<ProfitStatus>,
}

/// Year-over-year growth, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    /// Revenue growth (%)
    pub revenue: Option<f64>,
    /// Operating income growth (%)
    pub operating_income: Option<f64>,
    /// Net income growth (%)
    pub net_income: Option<f64>,
}

impl Growth {
    /// Accounts that carry a growth field.
    pub const ACCOUNTS: [Account; 3] = [
        Account::Revenue,
        Account::OperatingIncome,
        Account::NetIncome,
    ];

    /// Growth of a single account; `None` for accounts without a growth field.
    pub const fn get(&self, account: Account) -> Option<f64> {
        match account {
            Account::Revenue => self.revenue,
            Account::OperatingIncome => self.operating_income,
            Account::NetIncome => self.net_income,
            _ => None,
        }
    }

    /// Set the growth of a single account. Accounts without a growth field are ignored.
    pub const fn set(&mut self, account: Account, value: Option<f64>) {
        match account {
            Account::Revenue => self.revenue = value,
            Account::OperatingIncome => self.operating_income = value,
            Account::NetIncome => self.net_income = value,
            _ => {}
        }
    }
}

/// One (company, fiscal year, quarter) row of financial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    company: String,
    corp_code: String,
    industry_code: Option<String>,
    period: FiscalPeriod,
    kind: RowKind,
    figures: Figures,
    /// Derived ratios
    pub ratios: Ratios,
    /// Year-over-year growth
    pub growth: Growth,
}

impl PeriodRecord {
    /// Create a row of reported figures.
    pub fn actual(
        company: impl Into<String>,
        corp_code: impl Into<String>,
        period: FiscalPeriod,
        figures: Figures,
    ) -> Self {
        Self::new(company, corp_code, period, RowKind::Actual, figures)
    }

    /// Create a projected row.
    pub fn forecast(
        company: impl Into<String>,
        corp_code: impl Into<String>,
        period: FiscalPeriod,
        figures: Figures,
    ) -> Self {
        Self::new(company, corp_code, period, RowKind::Forecast, figures)
    }

    fn new(
        company: impl Into<String>,
        corp_code: impl Into<String>,
        period: FiscalPeriod,
        kind: RowKind,
        figures: Figures,
    ) -> Self {
        Self {
            company: company.into(),
            corp_code: corp_code.into(),
            industry_code: None,
            period,
            kind,
            figures,
            ratios: Ratios::default(),
            growth: Growth::default(),
        }
    }

    /// Attach the industry code from the company profile.
    pub fn with_industry_code(mut self, industry_code: Option<String>) -> Self {
        self.industry_code = industry_code;
        self
    }

    /// Company display name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// OpenDART corp code; groups rows by company.
    pub fn corp_code(&self) -> &str {
        &self.corp_code
    }

    /// Industry code, when the profile lookup succeeded.
    pub fn industry_code(&self) -> Option<&str> {
        self.industry_code.as_deref()
    }

    /// Fiscal period of the row.
    pub const fn period(&self) -> FiscalPeriod {
        self.period
    }

    /// Actual or forecast.
    pub const fn kind(&self) -> RowKind {
        self.kind
    }

    /// Raw account figures.
    pub const fn figures(&self) -> &Figures {
        &self.figures
    }

    /// Shorthand for `kind() == RowKind::Actual`.
    pub fn is_actual(&self) -> bool {
        self.kind == RowKind::Actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_dart_names_round_trip() {
        for account in Account::ALL {
            assert_eq!(Account::from_dart_name(account.dart_name()), Some(account));
        }
        assert_eq!(Account::from_dart_name("매출총이익"), None);
        assert_eq!(Account::from_dart_name(" 매출액 "), Some(Account::Revenue));
    }

    #[test]
    fn test_quarter_report_codes() {
        assert_eq!(Quarter::Q1.report_code(), "11013");
        assert_eq!(Quarter::Q2.report_code(), "11012");
        assert_eq!(Quarter::Q3.report_code(), "11014");
        assert_eq!(Quarter::Q4.report_code(), "11011");
        assert_eq!(Quarter::from_number(0), None);
        assert_eq!(Quarter::from_number(3), Some(Quarter::Q3));
    }

    #[test]
    fn test_fiscal_period_next_wraps_year() {
        let q4 = FiscalPeriod::new(2023, Quarter::Q4);
        assert_eq!(q4.next(), FiscalPeriod::new(2024, Quarter::Q1));
        assert_eq!(
            FiscalPeriod::new(2024, Quarter::Q2).next(),
            FiscalPeriod::new(2024, Quarter::Q3)
        );
        assert!(q4 < q4.next());
        assert_eq!(q4.to_string(), "2023-Q4");
    }

    #[test]
    fn test_quarters_since() {
        let q3 = FiscalPeriod::new(2022, Quarter::Q3);
        assert_eq!(FiscalPeriod::new(2023, Quarter::Q3).quarters_since(q3), 4);
        assert_eq!(FiscalPeriod::new(2023, Quarter::Q1).quarters_since(q3), 2);
        assert_eq!(q3.quarters_since(q3.next()), -1);
        assert_eq!(q3.next().ordinal(), q3.ordinal() + 1);
    }

    #[test]
    fn test_fiscal_periods_range() {
        let periods: Vec<_> = fiscal_periods(2020, 2021).collect();
        assert_eq!(periods.len(), 8);
        assert_eq!(periods[0], FiscalPeriod::new(2020, Quarter::Q1));
        assert_eq!(periods[7], FiscalPeriod::new(2021, Quarter::Q4));
        assert!(periods.windows(2).all(|w| w[0].next() == w[1]));

        assert_eq!(fiscal_periods(2022, 2021).count(), 0);
    }

    #[test]
    fn test_figures_get_set() {
        let mut figures = Figures::default();
        assert!(figures.is_empty());

        figures.set(Account::Revenue, Some(100.0));
        assert_eq!(figures.get(Account::Revenue), Some(100.0));
        assert_eq!(figures.revenue, Some(100.0));
        assert!(!figures.is_empty());
    }

    #[test]
    fn test_growth_ignores_balance_sheet_accounts() {
        let mut growth = Growth::default();
        growth.set(Account::TotalAssets, Some(5.0));
        assert_eq!(growth, Growth::default());
        growth.set(Account::NetIncome, Some(5.0));
        assert_eq!(growth.get(Account::NetIncome), Some(5.0));
    }

    #[test]
    fn test_record_constructors() {
        let period = FiscalPeriod::new(2024, Quarter::Q1);
        let record = PeriodRecord::actual("삼성전자", "00126380", period, Figures::default())
            .with_industry_code(Some("264".to_string()));

        assert!(record.is_actual());
        assert_eq!(record.company(), "삼성전자");
        assert_eq!(record.corp_code(), "00126380");
        assert_eq!(record.industry_code(), Some("264"));
        assert_eq!(record.period(), period);

        let forecast = PeriodRecord::forecast("삼성전자", "00126380", period, Figures::default());
        assert_eq!(forecast.kind(), RowKind::Forecast);
        assert_eq!(forecast.industry_code(), None);
    }
}
