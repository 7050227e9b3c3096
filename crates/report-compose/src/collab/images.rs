//! Filesystem image resolver

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::types::{ReportError, Result};

use super::{ImageResolver, ResolvedImage};

/// Resolves image references as paths relative to an asset root
///
/// Images are fill-resized and center-cropped to the requested size.
#[derive(Debug, Clone)]
pub struct FsImageResolver {
    root: PathBuf,
    filter: FilterType,
}

impl FsImageResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: FilterType::Triangle,
        }
    }

    /// Use a different resampling filter
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> Result<PathBuf> {
        if reference.contains("://") && !reference.starts_with("file://") {
            return Err(image_error(reference, "remote references are not supported"));
        }
        let path = Path::new(reference.strip_prefix("file://").unwrap_or(reference));
        Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        })
    }
}

fn image_error(reference: &str, message: impl ToString) -> ReportError {
    ReportError::Image {
        reference: reference.to_string(),
        message: message.to_string(),
    }
}

impl ImageResolver for FsImageResolver {
    fn resolve(&self, reference: &str, width: u32, height: u32) -> Result<ResolvedImage> {
        let path = self.path_for(reference)?;
        let decoded = image::open(&path).map_err(|e| image_error(reference, e))?;
        let filled = decoded.resize_to_fill(width.max(1), height.max(1), self.filter);

        log::debug!(
            "Resolved '{}' ({}x{} -> {}x{})",
            reference,
            decoded.width(),
            decoded.height(),
            filled.width(),
            filled.height()
        );

        Ok(ResolvedImage::from_rgb(reference, filled.to_rgb8()))
    }

    fn dimensions(&self, reference: &str) -> Result<(u32, u32)> {
        let path = self.path_for(reference)?;
        image::image_dimensions(&path).map_err(|e| image_error(reference, e))
    }
}
