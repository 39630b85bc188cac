//! Progress display for per-tile graph cuts

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Counts finished graph cuts across worker threads
///
/// A disabled tracker keeps a hidden bar so callers never branch on it.
pub struct TileProgress {
    bar: ProgressBar,
}

impl TileProgress {
    /// Create a tracker for `tiles` graph cuts
    pub fn new(tiles: usize, enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(tiles as u64);
            bar.set_style(TILE_STYLE.clone());
            bar.set_message("graph cuts");
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Record one finished tile
    pub fn tile_done(&self) {
        self.bar.inc(1);
    }

    /// Number of tiles recorded so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
