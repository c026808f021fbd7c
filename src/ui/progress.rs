//! Copy progress with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;

/// Per-variant copy progress bar.
///
/// Interactive mode draws an indicatif bar advancing one tick per cache
/// entry; plain mode prints a single line up front and stays quiet
/// until the summary.
pub struct CopyProgress {
    bar: Option<ProgressBar>,
}

impl CopyProgress {
    /// Start progress for one variant's copy pass
    pub fn new(ctx: &UiContext, variant: &str, total: u64) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "  {spinner:.cyan} Copying {prefix}  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}",
                    )
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .progress_chars("━╸─"),
            );
            bar.set_prefix(variant.to_string());
            Some(bar)
        } else {
            println!("Copying {} files from Vox {} ...", total, variant);
            None
        };
        Self { bar }
    }

    /// Record one attempted entry
    pub fn advance(&self, name: &OsStr) {
        if let Some(ref bar) = self.bar {
            bar.set_message(name.to_string_lossy().into_owned());
            bar.inc(1);
        }
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
