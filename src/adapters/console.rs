//! Console progress rendering on indicatif

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ports::ProgressSink;

/// Renders one progress bar per file
///
/// Known totals get a determinate seconds bar; unknown or zero totals fall
/// back to a spinner counting raw positions. Positions are applied
/// absolutely, so regressions from the encoder simply move the bar back.
pub struct ConsoleProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn determinate_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg} [{wide_bar}] {pos}/{len}s ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn indeterminate_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner} {msg} {pos} frames")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_file_start(&self, name: &str, total_seconds: Option<f64>) {
        let bar = match total_seconds {
            Some(total) => {
                let bar = ProgressBar::new(total.ceil() as u64);
                bar.set_style(Self::determinate_style());
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(Self::indeterminate_style());
                bar.enable_steady_tick(Duration::from_millis(120));
                bar
            }
        };
        bar.set_message(name.to_string());

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_position(&self, position: f64) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.set_position(position.max(0.0) as u64);
            }
        }
    }

    fn on_file_done(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish();
            }
        }
    }

    fn on_batch_done(&self, converted: usize) {
        println!("Converted {} file(s)", converted);
    }
}
