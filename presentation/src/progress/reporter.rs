//! Progress reporting for planning runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use routewise_application::{PlanProgressNotifier, PlanWarning};
use std::sync::Mutex;
use std::time::Duration;

/// Loading indicator backed by an indicatif spinner on stderr.
///
/// The spinner is created on the first status of a run and cleared by
/// `hide`, so the next run starts a fresh one.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanProgressNotifier for ProgressReporter {
    fn show_status(&self, status: &str) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        let pb = spinner.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_message(status.to_string());
    }

    fn hide(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    fn on_warning(&self, warning: &PlanWarning) {
        let line = format!("{} {}", "!".yellow().bold(), warning);
        if let Ok(spinner) = self.spinner.lock()
            && let Some(pb) = spinner.as_ref()
        {
            pb.suspend(|| eprintln!("{}", line));
            return;
        }
        eprintln!("{}", line);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PlanProgressNotifier for SimpleProgress {
    fn show_status(&self, status: &str) {
        eprintln!("{} {}", "->".cyan(), status);
    }

    fn hide(&self) {}

    fn on_warning(&self, warning: &PlanWarning) {
        eprintln!("  {} {}", "!".yellow().bold(), warning);
    }
}
