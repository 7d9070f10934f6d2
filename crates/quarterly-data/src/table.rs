//! Per-company period tables.
//!
//! The builder turns extracted amount strings into numeric [`Figures`] and
//! keeps the resulting records in chronological order with at most one
//! record per fiscal period.

use crate::dart::ExtractedPeriod;
use crate::statement::{Account, Figures, PeriodRecord};

/// Parse an OpenDART amount string.
///
/// Accepts thousands separators and parenthesised negatives. Blank strings,
/// a lone dash and anything unparsable yield `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative { -value } else { value })
}

/// Accumulates extracted periods of one company into an ordered table.
#[derive(Debug)]
pub struct PeriodTableBuilder {
    company: String,
    corp_code: String,
    industry_code: Option<String>,
    records: Vec<PeriodRecord>,
}

impl PeriodTableBuilder {
    /// Start a table for a company.
    pub fn new(company: impl Into<String>, corp_code: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            corp_code: corp_code.into(),
            industry_code: None,
            records: Vec::new(),
        }
    }

    /// Industry code stamped on every record.
    pub fn industry_code(mut self, industry_code: Option<String>) -> Self {
        self.industry_code = industry_code;
        self
    }

    /// Add one extracted period.
    ///
    /// Returns `false` when the period is already present; the first record
    /// for a period is kept.
    pub fn push(&mut self, extracted: &ExtractedPeriod) -> bool {
        if self.records.iter().any(|r| r.period() == extracted.period) {
            tracing::warn!(
                corp_code = %self.corp_code,
                period = %extracted.period,
                "duplicate period ignored"
            );
            return false;
        }

        let mut figures = Figures::default();
        for account in Account::ALL {
            let value = extracted.amount(account).and_then(|text| {
                let parsed = parse_amount(text);
                if parsed.is_none() {
                    tracing::debug!(
                        corp_code = %self.corp_code,
                        period = %extracted.period,
                        %account,
                        text,
                        "unparsable amount treated as missing"
                    );
                }
                parsed
            });
            figures.set(account, value);
        }

        let record = PeriodRecord::actual(
            self.company.clone(),
            self.corp_code.clone(),
            extracted.period,
            figures,
        )
        .with_industry_code(self.industry_code.clone());

        self.records.push(record);
        true
    }

    /// Number of periods accumulated so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no period has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish the table, sorted chronologically.
    pub fn build(mut self) -> Vec<PeriodRecord> {
        self.records.sort_by_key(PeriodRecord::period);
        self.records
    }
}
