use crate::models::Listing;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the collected listings as a pretty-printed JSON array to
/// `<output_dir>/<filename>`, creating the directory if needed.
/// Non-ASCII text (prices in ₹, Devanagari titles) is written literally.
pub fn save_listings(listings: &[Listing], filename: &str, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).context(format!(
        "Failed to create output directory: {}",
        output_dir.display()
    ))?;

    let path = output_dir.join(filename);
    let json = serde_json::to_string_pretty(listings).context("Failed to serialize listings")?;
    fs::write(&path, json).context(format!("Failed to write output file: {}", path.display()))?;

    Ok(path)
}
