use anyhow::Context;
use qnx_config::QnxConfig;
use qnx_engine::{CoherenceEngine, DataLoader, JsonDirLoader, LoadReport, demo};

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QnxConfig> {
    let mut config = QnxConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(dir) = &flags.data {
        config.data.dir = Some(dir.clone());
    }
    Ok(config)
}

/// Pick the dataset: `--demo`, then `--data` / `data.dir`, then the demo as a
/// fallback with a warning.
pub fn select_loader(config: &QnxConfig, flags: &GlobalFlags) -> Box<dyn DataLoader> {
    if flags.demo {
        return Box::new(demo::demo_loader());
    }
    match &config.data.dir {
        Some(dir) => Box::new(JsonDirLoader::new(dir)),
        None => {
            tracing::warn!("no dataset configured (--data or QUANNEX_DATA__DIR); using demo data");
            Box::new(demo::demo_loader())
        }
    }
}

pub async fn initialize_engine(
    config: &QnxConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<CoherenceEngine> {
    let loader = select_loader(config, flags);
    let engine = CoherenceEngine::new(config);
    let report: LoadReport = engine
        .initialize(loader.as_ref())
        .await
        .context("failed to initialize coherence engine")?;

    if report.skipped_rows() > 0 && !flags.quiet {
        tracing::warn!(
            skipped = report.skipped_rows(),
            "some dataset rows were skipped; run `qnx report` for details"
        );
    }
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use qnx_engine::loader::KPI_FILE;

    fn flags(data: Option<std::path::PathBuf>, demo: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            data,
            demo,
        }
    }

    #[tokio::test]
    async fn falls_back_to_demo_without_a_dataset() {
        let engine = initialize_engine(&QnxConfig::default(), &flags(None, false))
            .await
            .expect("demo should load");
        assert!(engine.is_initialized());
        assert!(engine.state().unwrap().statistics.total_kpis > 0);
    }

    #[tokio::test]
    async fn reads_the_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(KPI_FILE),
            r#"[{"id": "solo", "faceId": 2, "value": 5, "targetMin": 0,
                 "targetIdeal": 10, "direction": "up"}]"#,
        )
        .unwrap();

        let mut config = QnxConfig::default();
        config.data.dir = Some(dir.path().to_path_buf());
        let engine = initialize_engine(&config, &flags(None, false)).await.unwrap();
        assert_eq!(engine.state().unwrap().statistics.total_kpis, 1);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = QnxConfig::default();
        config.data.dir = Some(dir.path().join("absent"));
        let err = initialize_engine(&config, &flags(None, false))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("kpis.json"));
    }
}
