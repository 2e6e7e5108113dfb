use qnx_engine::CoherenceEngine;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `qnx state`.
pub fn handle(engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = engine.state()?;
    output(&snapshot, flags.format)
}
