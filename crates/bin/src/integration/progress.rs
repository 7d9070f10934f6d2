//! Terminal progress for the fetch loop.
//!
//! One bar counts requested periods across all companies. Log lines are
//! written through the bar so they never tear its rendering.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use quarterly::PipelineEvent;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// Shared progress bar, hidden until a run starts.
#[derive(Clone)]
pub(crate) struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub(crate) fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show the bar for `total` period requests.
    pub(crate) fn start(&self, total: u64) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.set_length(total);
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        self.bar.enable_steady_tick(std::time::Duration::from_millis(100));
    }

    pub(crate) fn handle(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::CompanyStarted { company, .. } => {
                self.bar.set_message(format!("{company}..."));
            }
            PipelineEvent::PeriodFinished { company, period, .. } => {
                self.bar.set_message(format!("{company} {period}"));
                self.bar.inc(1);
            }
            PipelineEvent::CompanyDropped { .. } | PipelineEvent::CompanyFinished { .. } => {}
        }
    }

    pub(crate) fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }

    pub(crate) fn abandon(&self) {
        self.bar.abandon_with_message("Failed!");
    }
}

/// Writes log lines to stderr with the bar suspended.
pub(crate) struct ProgressWriter {
    bar: ProgressBar,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for Progress {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressWriter {
            bar: self.bar.clone(),
        }
    }
}
