//! Companies to process, from flags, the config file and the directory.

use quarterly::CompanyTarget;
use quarterly::data::directory::CompanyDirectory;
use std::path::{Path, PathBuf};

/// Error type for target resolution.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TargetError {
    /// `--corp-code` and `--name` counts differ.
    #[error("every --corp-code needs a matching --name ({codes} codes, {names} names)")]
    Unpaired { codes: usize, names: usize },
    /// Names were given but there is nothing to look them up in.
    #[error("company names need a CORPCODE.xml snapshot, none found at {0}")]
    NoSnapshot(PathBuf),
}

/// Pair `--corp-code` values with `--name` values in order.
pub(crate) fn paired_targets(
    corp_codes: &[String],
    names: &[String],
) -> Result<Vec<CompanyTarget>, TargetError> {
    if corp_codes.len() != names.len() {
        return Err(TargetError::Unpaired {
            codes: corp_codes.len(),
            names: names.len(),
        });
    }
    Ok(corp_codes
        .iter()
        .zip(names)
        .map(|(code, name)| CompanyTarget::new(name.trim(), code.trim()))
        .collect())
}

/// Outcome of a directory lookup.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    /// Names found in the directory
    pub(crate) targets: Vec<CompanyTarget>,
    /// Names that are not in the directory
    pub(crate) unresolved: Vec<String>,
}

/// Resolve company names through the directory.
///
/// A name missing from the directory is reported and left out; only a missing
/// snapshot is an error.
pub(crate) fn resolve_names(
    names: &[String],
    directory: Option<&CompanyDirectory>,
    snapshot: &Path,
) -> Result<Resolution, TargetError> {
    let mut resolution = Resolution::default();
    if names.is_empty() {
        return Ok(resolution);
    }
    let directory = directory.ok_or_else(|| TargetError::NoSnapshot(snapshot.to_path_buf()))?;

    for name in names {
        match directory.corp_code(name) {
            Ok(code) => {
                tracing::info!(company = %name, corp_code = code, "resolved company");
                resolution.targets.push(CompanyTarget::new(name.trim(), code));
            }
            Err(e) => {
                tracing::warn!(company = %name, error = %e, "company not resolved, skipped");
                resolution.unresolved.push(name.trim().to_string());
            }
        }
    }
    Ok(resolution)
}

/// Append targets not already present, by corp code.
pub(crate) fn merge_targets(into: &mut Vec<CompanyTarget>, more: Vec<CompanyTarget>) {
    for target in more {
        if into.iter().any(|t| t.corp_code == target.corp_code) {
            tracing::debug!(corp_code = %target.corp_code, "duplicate company ignored");
            continue;
        }
        into.push(target);
    }
}
