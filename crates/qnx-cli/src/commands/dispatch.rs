use qnx_engine::CoherenceEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    engine: &CoherenceEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::State => commands::state::handle(engine, flags),
        Commands::Coherence => commands::coherence::handle(engine, flags),
        Commands::List(args) => commands::list::handle(&args, engine, flags),
        Commands::Update(args) => commands::update::handle(&args, engine, flags),
        Commands::Plan => commands::plan::handle(engine, flags),
        Commands::Report => commands::report::handle(engine, flags),
        Commands::Topology | Commands::Schema(_) => {
            unreachable!("topology/schema are pre-dispatched in main")
        }
    }
}
