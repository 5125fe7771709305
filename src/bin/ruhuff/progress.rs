//! A progress bar for reading the input file.
//!
//! Rendering is done by `indicatif`, see <https://docs.rs/indicatif>

use std::io::Read;

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// Wraps a reader and advances a progress bar by the number of bytes read from it.
///
/// The bar is cleared as soon as `total` bytes went through.
pub struct ProgressMonitor<R: Read> {
    total: usize,
    read: usize,
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// `action` is shown in front of the bar, e.g. "compressing"
    pub fn new(reader: R, size: usize, action: &'static str) -> Self {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{msg} {wide_bar} {binary_bytes}/{binary_total_bytes} [{eta} remaining]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress_bar = ProgressBar::new(size as u64)
            .with_style(style)
            .with_message(action);
        // The default is 20hz, this reduces rendering overhead
        progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        Self {
            total: size,
            read: 0,
            reader,
            progress_bar,
        }
    }

    fn update(&mut self, delta: usize) {
        self.progress_bar.inc(delta as u64);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let per_sec = self.total as f64 / elapsed.as_secs_f64().max(1e-3);
            debug!(
                "read {} in {} ({}/s avg)",
                HumanBytes(self.total as u64),
                HumanDuration(elapsed),
                HumanBytes(per_sec as u64)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let out = self.reader.read(buf)?;
        self.read += out;
        self.update(out);
        Ok(out)
    }
}
