//! Terminal implementation of [`ResultsDisplay`].

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sitesearch_core::{RenderOutput, ResultsDisplay};

/// Collects rendered output and shows a spinner on stderr while loading.
///
/// Only the latest output is kept; the caller prints it once all
/// interactions have been applied.
pub struct ConsoleDisplay {
    spinner_enabled: bool,
    spinner: Mutex<Option<ProgressBar>>,
    current: Mutex<Option<RenderOutput>>,
}

impl ConsoleDisplay {
    pub fn new(spinner_enabled: bool) -> Self {
        Self {
            spinner_enabled,
            spinner: Mutex::new(None),
            current: Mutex::new(None),
        }
    }

    /// The most recent output written to the display.
    pub fn current(&self) -> Option<RenderOutput> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a spinner is currently shown.
    pub fn is_loading(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn start_spinner(&self) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if !self.spinner_enabled {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Searching...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl ResultsDisplay for ConsoleDisplay {
    fn set_loading(&self, visible: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match (visible, spinner.take()) {
            (true, Some(existing)) => *spinner = Some(existing),
            (true, None) => *spinner = Some(self.start_spinner()),
            (false, Some(existing)) => existing.finish_and_clear(),
            (false, None) => {}
        }
    }

    fn replace(&self, output: &RenderOutput) {
        tracing::debug!(bindings = output.bindings.len(), "display updated");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(output.clone());
    }
}
