//! Company name to corp code lookup.
//!
//! OpenDART distributes its company list as `CORPCODE.xml`:
//!
//! ```xml
//! <result>
//!   <list>
//!     <corp_code>00126380</corp_code>
//!     <corp_name>삼성전자</corp_name>
//!     <stock_code>005930</stock_code>
//!     <modify_date>20230110</modify_date>
//!   </list>
//! </result>
//! ```
//!
//! The directory reads a local snapshot of that file.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One company of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpEntry {
    /// Eight-digit OpenDART corp code
    pub corp_code: String,
    /// Registered company name
    pub corp_name: String,
    /// Exchange ticker, for listed companies
    #[serde(default)]
    pub stock_code: Option<String>,
    /// Last modification date (YYYYMMDD)
    #[serde(default)]
    pub modify_date: Option<String>,
}

impl CorpEntry {
    /// True when the company has a stock code.
    pub fn is_listed(&self) -> bool {
        self.stock_code.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct CorpCodeDocument {
    #[serde(rename = "list", default)]
    entries: Vec<CorpEntry>,
}

/// Searchable list of companies.
#[derive(Debug, Clone, Default)]
pub struct CompanyDirectory {
    entries: Vec<CorpEntry>,
}

impl CompanyDirectory {
    /// Parse a `CORPCODE.xml` document.
    ///
    /// # Errors
    ///
    /// Returns `DataError::XmlParse` for malformed XML.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document: CorpCodeDocument = quick_xml::de::from_str(xml)?;

        let entries = document
            .entries
            .into_iter()
            .map(|mut entry| {
                entry.corp_code = entry.corp_code.trim().to_string();
                entry.corp_name = entry.corp_name.trim().to_string();
                entry.stock_code = entry
                    .stock_code
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
                entry
            })
            .collect();

        Ok(Self { entries })
    }

    /// Load a snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the file cannot be read, or an XML error
    /// when it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        let directory = Self::from_xml(&xml)?;
        tracing::info!(
            path = %path.display(),
            companies = directory.len(),
            "loaded company directory"
        );
        Ok(directory)
    }

    /// Load a snapshot if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error only when an existing file cannot be read or parsed.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Number of companies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the directory has no companies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Company with exactly this name. Listed companies win over unlisted
    /// namesakes.
    pub fn find(&self, name: &str) -> Option<&CorpEntry> {
        let name = name.trim();
        let mut matches = self.entries.iter().filter(|e| e.corp_name == name);
        let first = matches.next()?;
        if first.is_listed() {
            return Some(first);
        }
        Some(matches.find(|e| e.is_listed()).unwrap_or(first))
    }

    /// Resolve a company name to its corp code.
    ///
    /// # Errors
    ///
    /// Returns `DataError::CompanyNotFound` when no company has this name.
    pub fn corp_code(&self, name: &str) -> Result<&str> {
        self.find(name)
            .map(|e| e.corp_code.as_str())
            .ok_or_else(|| DataError::CompanyNotFound(name.to_string()))
    }

    /// Companies whose name contains `query`, listed companies first.
    pub fn search(&self, query: &str) -> Vec<&CorpEntry> {
        let query = query.trim();
        let mut hits: Vec<&CorpEntry> = self
            .entries
            .iter()
            .filter(|e| e.corp_name.contains(query))
            .collect();
        hits.sort_by_key(|e| (!e.is_listed(), e.corp_name.len()));
        hits
    }
}
