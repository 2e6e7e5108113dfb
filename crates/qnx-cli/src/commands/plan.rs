use qnx_engine::CoherenceEngine;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `qnx plan`. Prints `null` when every KPI already sits at its ideal.
pub fn handle(engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let plan = engine.action_plan()?;
    if plan.is_none() && !flags.quiet {
        tracing::info!("every KPI is at its ideal; nothing to improve");
    }
    output(&plan, flags.format)
}
