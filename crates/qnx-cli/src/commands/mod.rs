pub mod coherence;
pub mod dispatch;
pub mod list;
pub mod plan;
pub mod report;
pub mod schema;
pub mod state;
pub mod topology;
pub mod update;
