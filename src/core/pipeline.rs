use crate::core::{
    Batch, ConfigProvider, ImageEntry, MissingKeyPolicy, Pipeline, StackReport, Storage,
};
use crate::utils::error::{Result, StackError};
use image::imageops::FilterType;
use image::{imageops, DynamicImage, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub struct StackPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StackPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn compose_batch(&self, batch: &Batch) -> Result<PathBuf> {
        let target_width = self.config.target_width();

        // First pass: read every member and size the canvas from the
        // post-resize dimensions (taken from the image headers).
        let mut sources = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            let bytes = self.storage.read_file(&entry.path)?;
            let (width, height) = ImageReader::new(Cursor::new(&bytes))
                .with_guessed_format()?
                .into_dimensions()?;
            let scaled = scaled_height(width, height, target_width).ok_or_else(|| {
                StackError::ProcessingError {
                    message: format!(
                        "{} resizes to zero height at target width {}",
                        entry.path.display(),
                        target_width
                    ),
                }
            })?;
            sources.push((entry, bytes, scaled));
        }

        // Every member is resized to the target width, so the widest
        // resized member and the target width coincide.
        let canvas_width = target_width;
        let canvas_height: u32 = sources.iter().map(|(_, _, h)| *h).sum();

        // Second pass: decode, resize and draw top-to-bottom. Each decoded
        // image is dropped at the end of its iteration.
        let mut canvas = RgbImage::new(canvas_width, canvas_height);
        let mut y: i64 = 0;
        for (entry, bytes, scaled) in &sources {
            tracing::debug!("Decoding {}", entry.path.display());
            let decoded = image::load_from_memory(bytes)?;
            let resized = decoded.resize_exact(target_width, *scaled, FilterType::Lanczos3);
            imageops::overlay(&mut canvas, &resized.to_rgb8(), 0, y);
            y += i64::from(*scaled);
        }

        let mut encoded = Vec::new();
        DynamicImage::ImageRgb8(canvas)
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)?;

        let filename = format!("{}_{}.jpg", self.config.filename_prefix(), batch.index);
        self.storage.write_file(&filename, &encoded)?;

        Ok(Path::new(self.config.output_path()).join(filename))
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for StackPipeline<S, C> {
    fn scan(&self) -> Result<Vec<ImageEntry>> {
        let input_dir = Path::new(self.config.input_path());
        tracing::debug!("Listing {}", input_dir.display());

        let mut entries = Vec::new();
        for path in self.storage.list_dir(input_dir)? {
            if !is_jpg(&path) {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            match extract_numeric_key(stem) {
                Ok(key) => entries.push(ImageEntry { path, key }),
                Err(e) => match self.config.missing_key_policy() {
                    MissingKeyPolicy::Fail => return Err(e),
                    MissingKeyPolicy::Skip => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                    }
                },
            }
        }

        // Equal keys fall back to the path for a deterministic order.
        entries.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.path.cmp(&b.path)));

        tracing::debug!("Scan produced {} entries", entries.len());
        Ok(entries)
    }

    fn group(&self, entries: Vec<ImageEntry>) -> Result<Vec<Batch>> {
        let size = self.config.group_size();
        if size == 0 {
            return Err(StackError::ConfigError {
                message: "group_size must be at least 1".to_string(),
            });
        }

        Ok(entries
            .chunks(size)
            .enumerate()
            .map(|(i, chunk)| Batch {
                index: i + 1,
                entries: chunk.to_vec(),
            })
            .collect())
    }

    fn compose(&self, batches: Vec<Batch>) -> Result<StackReport> {
        let mut outputs = Vec::with_capacity(batches.len());
        for batch in &batches {
            let output = self.compose_batch(batch)?;
            println!(
                "Combined image {} saved to: {}",
                batch.index,
                output.display()
            );
            outputs.push(output);
        }
        Ok(StackReport { outputs })
    }
}

fn is_jpg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg"))
        .unwrap_or(false)
}

/// Concatenates every decimal digit of the stem, in order, into one key.
/// `img2_v3` becomes 23, not 2 or 3 alone.
pub fn extract_numeric_key(stem: &str) -> Result<u64> {
    let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(StackError::MissingNumericKey {
            filename: stem.to_string(),
        });
    }
    digits
        .parse::<u64>()
        .map_err(|_| StackError::InvalidNumericKey {
            filename: stem.to_string(),
            digits,
        })
}

/// Height after resizing to `target_width`, fractional part dropped.
/// `None` when the result degenerates to zero.
fn scaled_height(width: u32, height: u32, target_width: u32) -> Option<u32> {
    let scaled = (f64::from(target_width) / f64::from(width) * f64::from(height)) as u32;
    (scaled > 0).then_some(scaled)
}
