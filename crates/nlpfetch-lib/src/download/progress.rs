use crate::error::NlpFetchError;
use indicatif::{ProgressBar, ProgressStyle};

/// Receives byte counts while an archive is streamed to disk. Purely observational.
pub trait ProgressReporter {
    fn start(&mut self, file_name: &str, total: Option<u64>) -> Result<(), NlpFetchError>;

    fn advance(&mut self, bytes: u64);

    fn finish(&mut self);
}

/// Reporter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _file_name: &str, _total: Option<u64>) -> Result<(), NlpFetchError> {
        Ok(())
    }

    fn advance(&mut self, _bytes: u64) {}

    fn finish(&mut self) {}
}

/// Draws an `indicatif` bar on stderr, one bar per download.
#[derive(Default)]
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for TerminalProgress {
    fn start(&mut self, file_name: &str, total: Option<u64>) -> Result<(), NlpFetchError> {
        self.finish();

        let bar = match total {
            Some(total) => ProgressBar::new(total).with_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
                    .progress_chars("#>-"),
            ),
            // Server did not advertise a length
            None => ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})")?,
            ),
        };
        self.bar = Some(bar.with_message(file_name.to_string()));
        Ok(())
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
