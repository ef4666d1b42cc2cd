//! Slice a rendered page into per-line crop/label pairs.

use std::{fs, path::Path};

use image::{imageops, GrayImage};
use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::profile::{detect_bands, projection_profile};

/// Tuning knobs for [`segment_page`].
///
/// The defaults are tuned for clean black-on-white synthetic renders at
/// around 300 DPI.  They are deliberately not adaptive; override them
/// per call if your renders differ.
#[derive(Clone, Debug)]
pub struct SegmentConfig {
    /// Intensity at or below which a pixel counts as ink.  Default: 200.
    pub ink_threshold: u8,

    /// Minimum ink pixels per row for the row to belong to a line.
    /// Default: 10.
    pub density_threshold: u32,

    /// Rows and columns of breathing room added around each crop.
    /// Default: 3.
    pub padding: u32,

    /// Keep a line band that is still open at the bottom edge of the
    /// page.  Default: false, i.e. such a band is discarded.
    pub keep_trailing_band: bool,

    /// File extension, and thus encoding, for the line crops.
    /// Default: "tif".
    pub image_ext: String,
}

impl Default for SegmentConfig {
    fn default() -> SegmentConfig {
        SegmentConfig {
            ink_threshold: 200,
            density_threshold: 10,
            padding: 3,
            keep_trailing_band: false,
            image_ext: "tif".to_string(),
        }
    }
}

/// What [`segment_page`] did for one page.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SegmentReport {
    /// Line bands detected in the page.
    pub bands: usize,

    /// Crop/label pairs written.
    pub written: usize,

    /// Bands skipped because their label was missing or empty.
    pub skipped: usize,

    /// Bands whose artifacts could not be written.  Details are logged.
    pub failed: usize,
}

/// Crop `slice` horizontally to its padded ink bounding box.
///
/// If the slice contains no ink at all it is returned unchanged, so a
/// blank line yields a full-width crop rather than an error.  The trim
/// is a fixed point: trimming an already-trimmed crop returns an image
/// of the same size.
pub fn trim_horizontal(slice: &GrayImage, ink_threshold: u8, padding: u32) -> GrayImage {
    let mut ink_cols: Option<(u32, u32)> = None;
    for (x, _y, px) in slice.enumerate_pixels() {
        if px.0[0] <= ink_threshold {
            ink_cols = Some(match ink_cols {
                None => (x, x),
                Some((left, right)) => (left.min(x), right.max(x)),
            });
        }
    }
    match ink_cols {
        None => slice.clone(),
        Some((left, right)) => {
            let x0 = left.saturating_sub(padding);
            let x1 = (right + 1 + padding).min(slice.width());
            imageops::crop_imm(slice, x0, 0, x1 - x0, slice.height()).to_image()
        }
    }
}

/// Slice `image` into line bands and write one crop/label pair per band
/// into `out_dir`, creating the directory if needed.
///
/// `labels` must be index-aligned with the lines as rendered, top to
/// bottom: the Nth detected band is paired with the Nth label.  That
/// positional contract is the renderer's to uphold; nothing here matches
/// on content, so a line dropped during rendering shifts every label
/// after it.  Bands with no label, or whose label trims to the empty
/// string, produce no artifacts at all.
///
/// Pairs are named `{base_name}_line_{NNN}.{ext}` and
/// `{base_name}_line_{NNN}.gt.txt`, numbered from 001 in scan order.
/// A band whose artifacts cannot be written is logged and counted in
/// the report, and the remaining bands are still processed.
pub fn segment_page(
    image: &GrayImage,
    labels: &[String],
    out_dir: &Path,
    base_name: &str,
    config: &SegmentConfig,
) -> Result<SegmentReport> {
    fs::create_dir_all(out_dir).map_err(|source| Error::CreateDir {
        path: out_dir.to_owned(),
        source,
    })?;

    let profile = projection_profile(image, config.ink_threshold);
    let bands = detect_bands(
        &profile,
        config.density_threshold,
        config.keep_trailing_band,
    );
    debug!("{}: detected {} line bands", base_name, bands.len());

    let mut report = SegmentReport {
        bands: bands.len(),
        ..SegmentReport::default()
    };
    for (idx, band) in bands.iter().enumerate() {
        let label = labels.get(idx).map(|l| l.trim()).unwrap_or("");
        if label.is_empty() {
            debug!("{}: band {} has no label, skipping", base_name, idx);
            report.skipped += 1;
            continue;
        }

        let band = band.padded(config.padding, image.height());
        let slice =
            imageops::crop_imm(image, 0, band.top, image.width(), band.height()).to_image();
        let line = trim_horizontal(&slice, config.ink_threshold, config.padding);

        let stem = format!("{}_line_{:03}", base_name, idx + 1);
        let image_path = out_dir.join(format!("{}.{}", stem, config.image_ext));
        let label_path = out_dir.join(format!("{}.gt.txt", stem));

        if let Err(source) = line.save(&image_path) {
            warn!(
                "{}",
                Error::WriteImage {
                    path: image_path,
                    source
                }
            );
            report.failed += 1;
            continue;
        }
        if let Err(source) = fs::write(&label_path, label) {
            // Take the crop back out so the directory never holds an
            // image without its label.
            let _ = fs::remove_file(&image_path);
            warn!(
                "{}",
                Error::WriteLabel {
                    path: label_path,
                    source
                }
            );
            report.failed += 1;
            continue;
        }
        report.written += 1;
    }

    debug!(
        "{}: wrote {} pairs, skipped {}, failed {}",
        base_name, report.written, report.skipped, report.failed
    );
    Ok(report)
}
