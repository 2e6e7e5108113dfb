use qnx_core::snapshot::UpdateOutcome;
use qnx_engine::CoherenceEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UpdateArgs;
use crate::output::output;

/// Apply every assignment in order, stopping at the first failure.
///
/// Updates only live for this invocation; the dataset on disk is untouched.
fn apply(args: &UpdateArgs, engine: &CoherenceEngine) -> anyhow::Result<Vec<UpdateOutcome>> {
    args.assignments
        .iter()
        .map(|assignment| {
            engine
                .update_kpi(&assignment.kpi_id, assignment.value)
                .map_err(anyhow::Error::from)
        })
        .collect()
}

/// Handle `qnx update KPI_ID=VALUE...`.
pub fn handle(args: &UpdateArgs, engine: &CoherenceEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcomes = apply(args, engine)?;
    if args.state {
        return output(&engine.state()?, flags.format);
    }
    output(&outcomes, flags.format)
}

#[cfg(test)]
mod tests {
    use qnx_engine::EngineError;
    use qnx_engine::demo::demo_loader;

    use super::*;
    use crate::cli::root_commands::Assignment;

    fn args(pairs: &[(&str, f64)]) -> UpdateArgs {
        UpdateArgs {
            assignments: pairs
                .iter()
                .map(|(id, value)| Assignment {
                    kpi_id: (*id).to_string(),
                    value: *value,
                })
                .collect(),
            state: false,
        }
    }

    async fn engine() -> CoherenceEngine {
        let engine = CoherenceEngine::default();
        engine.initialize(&demo_loader()).await.unwrap();
        engine
    }

    #[tokio::test]
    async fn outcomes_chain_in_order() {
        let engine = engine().await;
        let outcomes = apply(&args(&[("fin-runway", 12.0), ("fin-margin", 60.0)]), &engine).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(
            (outcomes[1].previous_coherence - outcomes[0].global_coherence).abs() < 1e-15
        );
    }

    #[tokio::test]
    async fn stops_at_unknown_kpi() {
        let engine = engine().await;
        let err = apply(&args(&[("fin-runway", 12.0), ("ghost", 1.0)]), &engine).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::NotFound { .. })
        ));
        let runway = engine.state().unwrap();
        assert!((runway.kpi("fin-runway").unwrap().value - 12.0).abs() < f64::EPSILON);
    }
}
