//! Slice rendered text pages into per-line crops for OCR ground truth.
//!
//! Synthetic training data for an OCR engine is usually produced a page
//! at a time: a renderer lays a list of ground-truth text lines onto a
//! white page, and a segmenter slices the page back apart into one small
//! image per line, each paired with the text that was rendered into it.
//! This crate implements the segmenter half of that contract, along with
//! the two small jobs that surround it: checking that a finished dataset
//! directory really holds matched crop/label pairs, and re-wrapping a raw
//! text corpus into the short lines the renderer wants.
//!
//! ## Example code
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pageseg::{segment_page, SegmentConfig};
//!
//! let page = image::open("page_0001.tif").unwrap().to_luma8();
//! let labels = vec!["முதல் வரி".to_string(), "இரண்டாவது வரி".to_string()];
//! let report = segment_page(
//!     &page,
//!     &labels,
//!     Path::new("page_0001_lines"),
//!     "page_0001",
//!     &SegmentConfig::default(),
//! )
//! .unwrap();
//! println!("wrote {} line pairs", report.written);
//! ```
//!
//! ## How it works
//!
//! Lines are found with a horizontal projection profile: the page is
//! binarized, ink pixels are counted per row, and every run of rows whose
//! count stays above a density threshold becomes one line band.  Each
//! band is then cropped out with a little padding and trimmed
//! horizontally to its inked columns.
//!
//! ## Limitations
//!
//! The segmenter assumes clean, axis-aligned, black-on-white synthetic
//! renders.  It does not handle skew, multiple columns, rotated pages or
//! scanner noise; material like that needs a real layout-analysis
//! engine, which this is not.

#![warn(missing_docs)]

mod errors;
mod normalize;
mod pairing;
mod profile;
mod segment;

pub use crate::errors::{Error, Result};
pub use crate::normalize::wrap_words;
pub use crate::pairing::{verify_pairs, PairingReport};
pub use crate::profile::{detect_bands, projection_profile, Band};
pub use crate::segment::{segment_page, trim_horizontal, SegmentConfig, SegmentReport};
