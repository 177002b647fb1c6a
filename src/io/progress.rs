//! Batch progress display for multi-dungeon runs

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Dungeons: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks generated and failed dungeons across a batch
pub struct ProgressManager {
    bar: ProgressBar,
    failures: usize,
}

impl ProgressManager {
    /// Create a progress bar sized for `dungeon_count` dungeons
    pub fn new(dungeon_count: usize) -> Self {
        let bar = ProgressBar::new(dungeon_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar, failures: 0 }
    }

    /// Show which seed is currently being tried
    pub fn attempt(&self, seed: u64) {
        self.bar.set_message(format!("seed {seed}"));
    }

    /// Record a dungeon that was generated
    pub fn complete(&self) {
        self.bar.inc(1);
    }

    /// Record a dungeon that failed after every attempt
    pub fn fail(&mut self) {
        self.failures += 1;
        self.bar.inc(1);
    }

    /// Number of dungeons recorded as failed
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Clear the progress display
    pub fn finish(&self) {
        let message = if self.failures == 0 {
            "All dungeons generated".to_string()
        } else {
            format!("{} dungeons failed", self.failures)
        };
        self.bar.finish_with_message(message);
    }
}
