//! Consolidated-statement figure extraction.
//!
//! OpenDART's multi-account endpoint returns both consolidated (`CFS`) and
//! standalone (`OFS`) statements in one list. Only consolidated entries for
//! the accounts in [`Account::ALL`] are kept.

use crate::statement::{Account, FiscalPeriod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statement-type flag of the consolidated financial statement.
pub const CONSOLIDATED: &str = "CFS";

/// A single line item of an OpenDART financial statement response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Statement-type flag (`CFS` consolidated, `OFS` standalone)
    #[serde(rename = "fs_div")]
    pub statement_div: String,
    /// Account name
    #[serde(rename = "account_nm")]
    pub account_name: String,
    /// Current-term amount, thousands-separated
    #[serde(rename = "thstrm_amount", default)]
    pub amount: Option<String>,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        statement_div: impl Into<String>,
        account_name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            statement_div: statement_div.into(),
            account_name: account_name.into(),
            amount: Some(amount.into()),
        }
    }

    /// True for consolidated-statement entries.
    pub fn is_consolidated(&self) -> bool {
        self.statement_div == CONSOLIDATED
    }
}

/// Amount strings selected for one period, still in their textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPeriod {
    /// Period the figures belong to
    pub period: FiscalPeriod,
    /// Raw amount text per whitelisted account
    pub amounts: BTreeMap<Account, String>,
}

impl ExtractedPeriod {
    /// Select consolidated amounts for the whitelisted accounts.
    ///
    /// Accounts missing from `items` are simply absent from `amounts`. When an
    /// account is listed more than once the later entry wins.
    pub fn from_line_items(period: FiscalPeriod, items: &[LineItem]) -> Self {
        let mut amounts = BTreeMap::new();

        for item in items.iter().filter(|i| i.is_consolidated()) {
            if let Some(account) = Account::from_dart_name(&item.account_name)
                && let Some(amount) = &item.amount
            {
                amounts.insert(account, amount.clone());
            }
        }

        Self { period, amounts }
    }

    /// Raw amount text for an account.
    pub fn amount(&self, account: Account) -> Option<&str> {
        self.amounts.get(&account).map(String::as_str)
    }
}
