//! Glue between the command line and the pipeline.
//!
//! Resolves the companies to process, locates the directory snapshot and
//! renders progress while the pipeline runs.

pub(crate) mod progress;
pub(crate) mod snapshot;
pub(crate) mod targets;
