//! Turn rendered OCR training pages into per-line crop/label pairs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::error;
use pageseg::{segment_page, verify_pairs, wrap_words, SegmentConfig};

#[derive(Debug, Parser)]
/// Tools for preparing line-level OCR training data from synthetically
/// rendered pages: slice pages into per-line crop/label pairs, check a
/// finished dataset directory, and re-wrap a raw text corpus for the
/// renderer.
#[command(name = "page2lines", version)]
enum Args {
    /// Slice one or more page images into per-line pairs.
    ///
    /// Each page expects a sibling ground-truth text file with the same
    /// stem and a `.txt` extension, holding one label per rendered line,
    /// top to bottom.
    #[command(name = "segment")]
    Segment {
        /// Paths of the page images to slice.
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Output directory.  Defaults to `<page-stem>_lines` next to
        /// each page.
        #[arg(short = 'o', long)]
        out_dir: Option<PathBuf>,

        /// Intensity at or below which a pixel counts as ink.
        #[arg(long, default_value_t = 200)]
        ink_threshold: u8,

        /// Minimum ink pixels per row for the row to belong to a line.
        #[arg(long, default_value_t = 10)]
        density_threshold: u32,

        /// Padding in pixels around each crop.
        #[arg(long, default_value_t = 3)]
        padding: u32,

        /// Keep a line band that runs off the bottom edge of the page
        /// instead of discarding it.
        #[arg(long)]
        keep_trailing_band: bool,

        /// File extension, and thus encoding, for the line crops.
        #[arg(long, default_value = "tif")]
        ext: String,
    },

    /// Check that a dataset directory holds matched crop/label pairs.
    #[command(name = "verify")]
    Verify {
        /// The dataset directory to scan.
        dir: PathBuf,

        /// File extension of the image files.
        #[arg(long, default_value = "tif")]
        ext: String,
    },

    /// Re-wrap a raw text corpus into short ground-truth lines.
    #[command(name = "normalize")]
    Normalize {
        /// Path of the raw corpus text file.
        input: PathBuf,

        /// Path of the line-per-entry output file.
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Maximum number of words per output line.
        #[arg(long, default_value_t = 7)]
        words_per_line: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args {
        Args::Segment {
            pages,
            out_dir,
            ink_threshold,
            density_threshold,
            padding,
            keep_trailing_band,
            ext,
        } => {
            let config = SegmentConfig {
                ink_threshold,
                density_threshold,
                padding,
                keep_trailing_band,
                image_ext: ext,
            };
            cmd_segment(&pages, out_dir.as_deref(), &config)
        }
        Args::Verify { dir, ext } => cmd_verify(&dir, &ext),
        Args::Normalize {
            input,
            output,
            words_per_line,
        } => cmd_normalize(&input, &output, words_per_line),
    }
}

/// Segment a batch of pages.  A page that fails is logged and skipped so
/// the rest of the batch still runs; the process fails at the end if
/// anything went wrong.
fn cmd_segment(pages: &[PathBuf], out_dir: Option<&Path>, config: &SegmentConfig) -> Result<()> {
    let mut failed = 0;
    for page in pages {
        if let Err(err) = segment_one(page, out_dir, config) {
            error!("{}: {:#}", page.display(), err);
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{} of {} pages failed", failed, pages.len());
    }
    Ok(())
}

fn segment_one(page: &Path, out_dir: Option<&Path>, config: &SegmentConfig) -> Result<()> {
    let base = page
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("no filename in {}", page.display()))?;
    let out_dir = match out_dir {
        Some(dir) => dir.to_owned(),
        None => page.with_file_name(format!("{}_lines", base)),
    };

    let image = image::open(page)
        .with_context(|| format!("could not read page image {}", page.display()))?
        .to_luma8();

    let gt_path = page.with_extension("txt");
    let gt = fs::read_to_string(&gt_path)
        .with_context(|| format!("could not read ground truth {}", gt_path.display()))?;
    let labels: Vec<String> = gt.lines().map(|l| l.to_string()).collect();

    let report = segment_page(&image, &labels, &out_dir, base, config)?;
    println!(
        "{}: {} bands, {} pairs written, {} skipped, {} failed",
        page.display(),
        report.bands,
        report.written,
        report.skipped,
        report.failed
    );
    if report.failed > 0 {
        bail!("{} bands could not be written", report.failed);
    }
    Ok(())
}

fn cmd_verify(dir: &Path, ext: &str) -> Result<()> {
    let report = verify_pairs(dir, ext)
        .with_context(|| format!("could not verify {}", dir.display()))?;
    for stem in &report.missing_images {
        println!("missing image: {}.{}", stem, ext);
    }
    for stem in &report.missing_labels {
        println!("missing label: {}.gt.txt", stem);
    }
    for stem in &report.empty_labels {
        println!("empty label: {}.gt.txt", stem);
    }
    println!("{} pairs checked", report.checked);

    let mismatches = report.missing_images.len()
        + report.missing_labels.len()
        + report.empty_labels.len();
    if mismatches > 0 {
        bail!("{} mismatches found", mismatches);
    }
    Ok(())
}

fn cmd_normalize(input: &Path, output: &Path, words_per_line: usize) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("could not read corpus {}", input.display()))?;
    let lines = wrap_words(&text, words_per_line);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
    }
    let mut data = lines.join("\n");
    if !data.is_empty() {
        data.push('\n');
    }
    fs::write(output, data)
        .with_context(|| format!("could not write {}", output.display()))?;
    println!("{}: {} lines", output.display(), lines.len());
    Ok(())
}
