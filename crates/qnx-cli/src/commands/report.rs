use anyhow::Context;
use qnx_engine::CoherenceEngine;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `qnx report`.
pub fn handle(engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = engine
        .load_report()
        .context("engine has no load report")?;
    output(&report, flags.format)
}
