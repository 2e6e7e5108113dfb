use qnx_core::rows::{RawRow, TopologyRows};
use qnx_core::snapshot::{
    ActionPlan, AxisSnapshot, BreathSummary, EdgeSnapshot, EngineSnapshot, FaceSnapshot,
    KpiSnapshot, ShadowSummary, Statistics, UpdateOutcome, VertexSnapshot,
};
use schemars::{Schema, schema_for};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::{SchemaArgs, SchemaType};

fn schema(type_name: SchemaType) -> Schema {
    match type_name {
        SchemaType::Snapshot => schema_for!(EngineSnapshot),
        SchemaType::Face => schema_for!(FaceSnapshot),
        SchemaType::Kpi => schema_for!(KpiSnapshot),
        SchemaType::Edge => schema_for!(EdgeSnapshot),
        SchemaType::Vertex => schema_for!(VertexSnapshot),
        SchemaType::Axis => schema_for!(AxisSnapshot),
        SchemaType::Breath => schema_for!(BreathSummary),
        SchemaType::Shadow => schema_for!(ShadowSummary),
        SchemaType::Statistics => schema_for!(Statistics),
        SchemaType::UpdateOutcome => schema_for!(UpdateOutcome),
        SchemaType::ActionPlan => schema_for!(ActionPlan),
        SchemaType::KpiRow => schema_for!(RawRow),
        SchemaType::Topology => schema_for!(TopologyRows),
    }
}

/// Handle `qnx schema <type>`. Always JSON, whatever `--format` says.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema(args.type_name);
    let rendered = match flags.format {
        OutputFormat::Raw => serde_json::to_string(&schema)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(&schema)?,
    };
    println!("{rendered}");
    Ok(())
}
