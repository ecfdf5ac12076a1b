//! Screenshot artifacts
//!
//! Failures and checkpoints are captured as PNG files under the configured
//! artifacts directory; the filesystem is a plain output sink.

use std::path::{Path, PathBuf};

use chromiumoxide::page::{Page, ScreenshotParams};
use chromiumoxide_cdp::cdp::browser_protocol::page::CaptureScreenshotFormat;
use tracing::info;

use crate::error::{HarnessError, HarnessResult};

/// Capture the full page as a PNG under `dir` and return the file path.
pub async fn capture(page: &Page, dir: &Path, label: &str) -> HarnessResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .build();
    let image = page
        .screenshot(params)
        .await
        .map_err(|e| HarnessError::CommandFailed(format!("screenshot failed: {e}")))?;

    let path = artifact_path(dir, label, chrono::Local::now());
    std::fs::write(&path, &image)?;
    info!(path = %path.display(), bytes = image.len(), "screenshot saved");
    Ok(path)
}

fn artifact_path(dir: &Path, label: &str, now: chrono::DateTime<chrono::Local>) -> PathBuf {
    let slug: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    dir.join(format!("{}-{}.png", slug, now.format("%Y%m%d-%H%M%S")))
}
