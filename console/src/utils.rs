use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context};
use clap::Args;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use log::{warn, LevelFilter};

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace). Ignored when RUST_LOG is set.",
        help_heading = "UTILS"
    )]
    verbose: u8,
    #[arg(
        long,
        default_value_t = false,
        help = "Display a progress bar.",
        help_heading = "UTILS"
    )]
    pub progress: bool,
    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads to use. Defaults to all available cores.",
        help_heading = "UTILS"
    )]
    pub threads: Option<usize>,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        let mut builder = pretty_env_logger::formatted_builder();
        match std::env::var("RUST_LOG") {
            Ok(filters) => {
                builder.parse_filters(&filters);
            },
            Err(_) => {
                builder.filter_level(match self.verbose {
                    0 => LevelFilter::Warn,
                    1 => LevelFilter::Info,
                    2 => LevelFilter::Debug,
                    _ => LevelFilter::Trace,
                });
            },
        }
        builder
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

        if let Some(threads) = self.threads {
            ensure!(threads > 0, "Number of threads must be positive");
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to configure the thread pool")?;
        }
        Ok(())
    }

    /// Records are converted in parallel unless a single thread is requested.
    pub fn parallel(&self) -> bool {
        self.threads != Some(1)
    }
}

pub(crate) fn init_progress(
    total: usize,
    enabled: bool,
) -> anyhow::Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Reading...");
    Ok(progress_bar)
}

/// Expands glob patterns. Plain paths are passed through as-is.
pub(crate) fn expand_wildcards(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut expanded_paths = Vec::new();

    for path in paths {
        if path.contains('*') || path.contains('?') {
            let matches = glob(path)
                .with_context(|| format!("Invalid wildcard pattern '{}'", path))?;
            let before = expanded_paths.len();
            expanded_paths.extend(matches.filter_map(Result::ok));
            if expanded_paths.len() == before {
                warn!("Pattern '{}' matched no files", path);
            }
        }
        else {
            expanded_paths.push(PathBuf::from(path));
        }
    }

    ensure!(!expanded_paths.is_empty(), "No input files");
    Ok(expanded_paths)
}
