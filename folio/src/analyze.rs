//! Running the theme analysis for every section.

use log::{info, warn};
use rayon::prelude::*;

use photo_theme::{DecodeError, Theme, ThemeRegistry, analyze_image};

use std::sync::mpsc;

use crate::manifest::Job;

/// Store the outcome of one analysis. On failure the section keeps its current theme.
///
/// Returns `true` if the registry changed.
pub fn apply(
    registry: &mut ThemeRegistry,
    section: &str,
    result: Result<Theme, DecodeError>,
) -> bool {
    match result {
        Ok(theme) => {
            info!(
                "{section}: background {}, text {}, accent {}",
                theme.background, theme.text, theme.accent
            );
            registry.set_theme(section, theme);
            true
        }
        Err(e) => {
            warn!("{section}: keeping previous theme: {e}");
            false
        }
    }
}

/// Analyze all jobs in parallel and store the results as they complete.
///
/// When several jobs target the same section, the one that finishes last wins.
/// Returns the number of sections updated.
pub fn run(jobs: &[Job], registry: &mut ThemeRegistry) -> usize {
    let (tx, rx) = mpsc::channel();
    jobs.par_iter().for_each_with(tx, |tx, job| {
        // The receiver outlives every sender.
        let _ = tx.send((job.section.as_str(), analyze_image(&job.image)));
    });
    let mut updated = 0;
    for (section, result) in rx {
        if apply(registry, section, result) {
            updated += 1;
        }
    }
    updated
}
