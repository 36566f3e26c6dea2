use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};
use wave_config::{WaveConfig, load_config};
use wave_core::{FileReport, run_pipeline};
use wave_normalization::NormalizationSummary;
use wave_output::{PreviewOptions, render_preview, write_xlsx};

use crate::cli::Cli;

/// Everything the command prints once the workbook is written.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub folder: PathBuf,
    pub output: PathBuf,
    pub files: Vec<FileReport>,
    pub rows: usize,
    pub columns: usize,
    pub normalization: NormalizationSummary,
    /// Rendered table preview, unless disabled.
    pub preview: Option<String>,
}

/// Built-in configuration, or the given TOML file validated.
pub fn load_run_config(path: Option<&Path>) -> Result<WaveConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("load config {}", path.display()))
        }
        None => {
            debug!("Using built-in configuration");
            Ok(WaveConfig::default())
        }
    }
}

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let config = load_run_config(cli.config.as_deref())?;

    let started = Instant::now();
    let outcome = run_pipeline(&cli.folder, &config)
        .with_context(|| format!("merge exports in {}", cli.folder.display()))?;
    info!(elapsed = ?started.elapsed(), "Pipeline finished");

    {
        let _span = info_span!("write", path = %cli.output.display()).entered();
        let started = Instant::now();
        write_xlsx(&outcome.table, &cli.output)
            .with_context(|| format!("write {}", cli.output.display()))?;
        info!(elapsed = ?started.elapsed(), "Workbook written");
    }

    let preview = if cli.no_preview {
        None
    } else {
        let options = PreviewOptions {
            max_rows: cli.preview_rows,
            styled: cli.styled_output(),
            ..PreviewOptions::default()
        };
        Some(render_preview(&outcome.table, &options).context("render preview")?)
    };

    Ok(RunSummary {
        folder: cli.folder.clone(),
        output: cli.output.clone(),
        rows: outcome.table.height(),
        columns: outcome.table.width(),
        files: outcome.report.files,
        normalization: outcome.report.normalization,
        preview,
    })
}
