use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Full engine snapshot: faces, edges, vertices, breath, shadows, statistics.
    State,
    /// Global coherence score, status band, and summary statistics.
    Coherence,
    /// List one element family.
    List(ListArgs),
    /// Apply KPI updates in order and report each propagation.
    Update(UpdateArgs),
    /// Suggest the single KPI change with the highest leverage.
    Plan,
    /// Rows kept and skipped while loading the dataset.
    Report,
    /// Print the built-in dodecahedron as topology.json rows.
    Topology,
    /// Print the JSON Schema for an output type.
    Schema(SchemaArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListTarget {
    Faces,
    Kpis,
    Edges,
    Vertices,
    Axes,
    Shadows,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    pub target: ListTarget,
}

/// `KPI_ID=VALUE`
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub kpi_id: String,
    pub value: f64,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KPI_ID=VALUE, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing KPI id in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value in '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("value must be finite in '{raw}'"));
    }
    Ok(Assignment {
        kpi_id: id.to_string(),
        value,
    })
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// One or more `KPI_ID=VALUE` assignments.
    #[arg(required = true, value_parser = parse_assignment)]
    pub assignments: Vec<Assignment>,

    /// Print the resulting snapshot instead of the per-update outcomes.
    #[arg(long)]
    pub state: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Snapshot,
    Face,
    Kpi,
    Edge,
    Vertex,
    Axis,
    Breath,
    Shadow,
    Statistics,
    UpdateOutcome,
    ActionPlan,
    KpiRow,
    Topology,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
