use qnx_engine::builtin_topology_rows;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `qnx topology`: the built-in table in `topology.json` form, a
/// starting point for custom datasets.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&builtin_topology_rows(), flags.format)
}
