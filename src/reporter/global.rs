//! Optional process-wide reporter.
//!
//! Installed once at startup; later installs fail. Reporting through the
//! global before installation returns `ReportError::Unconfigured`.

use super::stack_reporter::{ReportOutcome, StackReporter};
use crate::utils::error::ReportError;
use log::info;
use std::sync::{Arc, OnceLock};

static GLOBAL_REPORTER: OnceLock<Arc<StackReporter>> = OnceLock::new();

/// Install `reporter` as the process-wide default
///
/// **Public** - returns the shared handle so the caller can keep using it
pub fn install_global(reporter: StackReporter) -> Result<Arc<StackReporter>, ReportError> {
    let reporter = Arc::new(reporter);
    GLOBAL_REPORTER
        .set(Arc::clone(&reporter))
        .map_err(|_| ReportError::AlreadyConfigured)?;

    info!("Installed global stack reporter");
    Ok(reporter)
}

/// The installed reporter, if any
pub fn global() -> Option<Arc<StackReporter>> {
    GLOBAL_REPORTER.get().cloned()
}

/// Report `stack` through the process-wide reporter
///
/// **Public** - for call sites without an explicit handle
pub fn report_stacktrace(stack: &str) -> Result<ReportOutcome, ReportError> {
    GLOBAL_REPORTER
        .get()
        .ok_or(ReportError::Unconfigured)?
        .report(stack)
}
