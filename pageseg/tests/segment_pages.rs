//! End-to-end tests for page segmentation, using small synthetic pages.

use image::{GrayImage, Luma};
use pageseg::{segment_page, verify_pairs, SegmentConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A white page with full-width black bars over the given row ranges.
fn page_with_bars(width: u32, height: u32, bars: &[(u32, u32)]) -> GrayImage {
    GrayImage::from_fn(width, height, |_x, y| {
        if bars.iter().any(|&(top, bottom)| (top..bottom).contains(&y)) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

fn labels(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[test]
fn two_bar_page_produces_two_labeled_pairs() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = page_with_bars(300, 120, &[(20, 40), (70, 90)]);

    let report = segment_page(
        &page,
        &labels(&["first line", "second line"]),
        dir.path(),
        "base",
        &SegmentConfig::default(),
    )
    .unwrap();
    assert_eq!(report.bands, 2);
    assert_eq!(report.written, 2);
    assert_eq!(report.failed, 0);

    let first = image::open(dir.path().join("base_line_001.tif"))
        .unwrap()
        .to_luma8();
    let second = image::open(dir.path().join("base_line_002.tif"))
        .unwrap()
        .to_luma8();
    // Padded bands [17, 43) and [67, 93); the bars span the full width,
    // so the horizontal trim has nothing to remove.
    assert_eq!(first.dimensions(), (300, 26));
    assert_eq!(second.dimensions(), (300, 26));

    let first_label =
        std::fs::read_to_string(dir.path().join("base_line_001.gt.txt")).unwrap();
    let second_label =
        std::fs::read_to_string(dir.path().join("base_line_002.gt.txt")).unwrap();
    assert_eq!(first_label, "first line");
    assert_eq!(second_label, "second line");
}

#[test]
fn crops_are_trimmed_to_the_inked_columns() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = GrayImage::from_fn(200, 60, |x, y| {
        if (20..35).contains(&y) && (50..120).contains(&x) {
            Luma([0])
        } else {
            Luma([255])
        }
    });

    segment_page(
        &page,
        &labels(&["short line"]),
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();

    let crop = image::open(dir.path().join("page_line_001.tif"))
        .unwrap()
        .to_luma8();
    // Ink columns [50, 120) padded by 3 on each side; padded band [17, 38).
    assert_eq!(crop.dimensions(), (76, 21));
}

#[test]
fn every_label_has_an_image_and_vice_versa() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = page_with_bars(200, 150, &[(10, 25), (55, 70), (100, 115)]);

    segment_page(
        &page,
        &labels(&["one", "two", "three"]),
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();

    // The downstream validator's own check holds on our output.
    let report = verify_pairs(dir.path(), "tif").unwrap();
    assert_eq!(report.checked, 3);
    assert!(report.is_clean());
}

#[test]
fn bands_without_labels_produce_no_artifacts() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = page_with_bars(200, 150, &[(10, 25), (55, 70), (100, 115)]);

    let report = segment_page(
        &page,
        &labels(&["only line"]),
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();
    assert_eq!(report.bands, 3);
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 2);

    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn whitespace_only_labels_are_skipped_but_keep_numbering() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = page_with_bars(200, 100, &[(10, 25), (55, 70)]);

    let report = segment_page(
        &page,
        &labels(&["   ", "kept"]),
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();
    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);

    // Numbering follows the band index, not the number of files written.
    assert!(!dir.path().join("page_line_001.tif").exists());
    assert!(dir.path().join("page_line_002.tif").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("page_line_002.gt.txt")).unwrap(),
        "kept"
    );
}

#[test]
fn ink_touching_the_bottom_edge_is_dropped_by_default() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    // The second bar runs all the way to the last row, so its band never
    // closes.
    let page = page_with_bars(100, 60, &[(10, 20), (45, 60)]);
    let labels = labels(&["kept", "dropped"]);

    let report = segment_page(
        &page,
        &labels,
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();
    assert_eq!(report.bands, 1);
    assert_eq!(report.written, 1);
    assert!(!dir.path().join("page_line_002.tif").exists());

    let config = SegmentConfig {
        keep_trailing_band: true,
        ..SegmentConfig::default()
    };
    let report = segment_page(&page, &labels, dir.path(), "page2", &config).unwrap();
    assert_eq!(report.bands, 2);
    assert_eq!(report.written, 2);
    assert!(dir.path().join("page2_line_002.tif").exists());
}

#[test]
fn blank_page_produces_nothing() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let page = GrayImage::from_pixel(100, 100, Luma([255]));

    let report = segment_page(
        &page,
        &labels(&["ghost line"]),
        dir.path(),
        "page",
        &SegmentConfig::default(),
    )
    .unwrap();
    assert_eq!(report.bands, 0);
    assert_eq!(report.written, 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
