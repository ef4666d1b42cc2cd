//! Ink projection profiles and line band detection.

use image::GrayImage;
#[cfg(test)]
use image::Luma;

/// A contiguous vertical interval of rows `[top, bottom)` believed to
/// contain a single line of text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Band {
    /// The first row of the band (inclusive).
    pub top: u32,
    /// One past the last row of the band (exclusive).
    pub bottom: u32,
}

impl Band {
    /// The height of the band in rows.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Grow the band by `padding` rows in both directions, clamped to an
    /// image of the given height.
    pub fn padded(&self, padding: u32, image_height: u32) -> Band {
        Band {
            top: self.top.saturating_sub(padding),
            bottom: (self.bottom + padding).min(image_height),
        }
    }
}

/// Count the ink pixels in each row of `image`.
///
/// A pixel counts as ink when its intensity is at or below
/// `ink_threshold`.  The returned profile has one entry per image row,
/// top to bottom.
pub fn projection_profile(image: &GrayImage, ink_threshold: u8) -> Vec<u32> {
    let mut profile = vec![0u32; cast::usize(image.height())];
    for (_x, y, px) in image.enumerate_pixels() {
        if px.0[0] <= ink_threshold {
            profile[cast::usize(y)] += 1;
        }
    }
    profile
}

/// Find every run of consecutive rows whose ink count exceeds
/// `density_threshold`.
///
/// The scan walks the profile top to bottom with two states, outside a
/// line and inside a line.  Crossing above the threshold opens a band;
/// falling back to or below it closes the band at the current row.  A
/// band still open at the bottom edge of the profile is discarded unless
/// `keep_trailing_band` is set: a line touching the bottom edge usually
/// means the renderer ran out of page, and half a line is worse training
/// data than no line.
pub fn detect_bands(
    profile: &[u32],
    density_threshold: u32,
    keep_trailing_band: bool,
) -> Vec<Band> {
    let mut bands = vec![];
    let mut open: Option<u32> = None;
    for (row, &ink) in (0u32..).zip(profile.iter()) {
        match open {
            None if ink > density_threshold => open = Some(row),
            Some(top) if ink <= density_threshold => {
                bands.push(Band { top, bottom: row });
                open = None;
            }
            _ => {}
        }
    }
    if keep_trailing_band {
        if let Some(top) = open {
            let bottom = cast::u32(profile.len()).expect("profile taller than u32");
            bands.push(Band { top, bottom });
        }
    }
    bands
}

#[test]
fn profile_counts_ink_pixels_per_row() {
    let image = GrayImage::from_fn(4, 3, |x, y| {
        if y == 1 && x < 2 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    assert_eq!(projection_profile(&image, 200), vec![0, 2, 0]);
}

#[test]
fn detects_separated_bands_in_order() {
    let mut profile = vec![0u32; 40];
    for row in 5..10 {
        profile[row] = 80;
    }
    for row in 20..30 {
        profile[row] = 120;
    }
    let bands = detect_bands(&profile, 10, false);
    assert_eq!(
        bands,
        vec![Band { top: 5, bottom: 10 }, Band { top: 20, bottom: 30 }]
    );
}

#[test]
fn density_threshold_is_exclusive() {
    let profile = vec![10, 11, 10];
    assert_eq!(
        detect_bands(&profile, 10, false),
        vec![Band { top: 1, bottom: 2 }]
    );
}

#[test]
fn drops_band_still_open_at_bottom_edge() {
    let mut profile = vec![0u32; 20];
    for row in 3..7 {
        profile[row] = 50;
    }
    // This run never closes before the profile ends.
    for row in 15..20 {
        profile[row] = 50;
    }

    let bands = detect_bands(&profile, 10, false);
    assert_eq!(bands, vec![Band { top: 3, bottom: 7 }]);

    let bands = detect_bands(&profile, 10, true);
    assert_eq!(
        bands,
        vec![Band { top: 3, bottom: 7 }, Band { top: 15, bottom: 20 }]
    );
}

#[test]
fn padding_clamps_to_the_image() {
    let band = Band { top: 2, bottom: 98 };
    assert_eq!(band.padded(3, 100), Band { top: 0, bottom: 100 });
    assert_eq!(band.padded(3, 200), Band { top: 0, bottom: 101 });
}
