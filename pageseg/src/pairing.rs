//! Check that a dataset directory holds matched crop/label pairs.
//!
//! The renderer and the segmenter both promise that every line crop has
//! a label and vice versa.  This is the independent, after-the-fact
//! check of that promise, run over the files actually on disk.

use std::{collections::BTreeSet, fs, path::Path};

use log::debug;

use crate::errors::{Error, Result};

/// The suffix that marks a ground-truth label file.
const LABEL_SUFFIX: &str = ".gt.txt";

/// The result of scanning one dataset directory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PairingReport {
    /// Label files found, paired or not.
    pub checked: usize,

    /// Stems with a label file but no image file.
    pub missing_images: Vec<String>,

    /// Stems with an image file but no label file.
    pub missing_labels: Vec<String>,

    /// Stems whose label file exists but is empty.
    pub empty_labels: Vec<String>,
}

impl PairingReport {
    /// Did every file have its partner, and every label some content?
    pub fn is_clean(&self) -> bool {
        self.missing_images.is_empty()
            && self.missing_labels.is_empty()
            && self.empty_labels.is_empty()
    }
}

/// Scan `dir` and pair every `*.gt.txt` file against a same-stem
/// `*.{image_ext}` file.
///
/// Subdirectories are not descended into; each font or page output
/// directory is checked on its own.  All lists in the report are sorted
/// by stem.
pub fn verify_pairs(dir: &Path, image_ext: &str) -> Result<PairingReport> {
    let mkerr = |source| Error::ReadDir {
        path: dir.to_owned(),
        source,
    };

    let image_suffix = format!(".{}", image_ext);
    let mut label_stems = BTreeSet::new();
    let mut image_stems = BTreeSet::new();
    let mut empty_labels = vec![];

    for entry in fs::read_dir(dir).map_err(mkerr)? {
        let entry = entry.map_err(mkerr)?;
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if let Some(stem) = name.strip_suffix(LABEL_SUFFIX) {
            if entry.metadata().map_err(mkerr)?.len() == 0 {
                empty_labels.push(stem.to_string());
            }
            label_stems.insert(stem.to_string());
        } else if let Some(stem) = name.strip_suffix(&image_suffix) {
            image_stems.insert(stem.to_string());
        }
    }
    empty_labels.sort();

    debug!(
        "{}: {} labels, {} images",
        dir.display(),
        label_stems.len(),
        image_stems.len()
    );
    Ok(PairingReport {
        checked: label_stems.len(),
        missing_images: label_stems.difference(&image_stems).cloned().collect(),
        missing_labels: image_stems.difference(&label_stems).cloned().collect(),
        empty_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_orphans_on_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_line_001.tif"), b"x").unwrap();
        fs::write(dir.path().join("a_line_001.gt.txt"), "text").unwrap();
        fs::write(dir.path().join("a_line_002.tif"), b"x").unwrap();
        fs::write(dir.path().join("a_line_003.gt.txt"), "text").unwrap();
        fs::write(dir.path().join("a_line_004.tif"), b"x").unwrap();
        fs::write(dir.path().join("a_line_004.gt.txt"), "").unwrap();
        fs::write(dir.path().join("notes.json"), b"{}").unwrap();

        let report = verify_pairs(dir.path(), "tif").unwrap();
        assert_eq!(report.checked, 3);
        assert_eq!(report.missing_images, vec!["a_line_003".to_string()]);
        assert_eq!(report.missing_labels, vec!["a_line_002".to_string()]);
        assert_eq!(report.empty_labels, vec!["a_line_004".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn clean_directory_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_line_001.tif"), b"x").unwrap();
        fs::write(dir.path().join("b_line_001.gt.txt"), "text").unwrap();

        let report = verify_pairs(dir.path(), "tif").unwrap();
        assert_eq!(report.checked, 1);
        assert!(report.is_clean());
    }
}
