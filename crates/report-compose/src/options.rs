use crate::constants::{GALLERY_SPACING, IMAGE_OVERSAMPLE, MAX_IMAGE_OVERSAMPLE};
use crate::paginate::PaginationBudget;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page geometry and composition settings
///
/// Lengths are page units unless the field name says pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportOptions {
    pub paper_size: PaperSize,

    // Content origin
    pub page_start_x: f32,
    pub page_start_y: f32,

    // Gallery and body text
    pub image_spacing: f32,
    pub image_oversample: u32,
    pub header_rule_offset: f32,
    pub body_offset_first: f32,
    pub body_offset_continuation: f32,
    pub about_column_width: f32,
    pub column_gutter: f32,

    pub pagination: PaginationBudget,

    pub cover: CoverOptions,
    pub map: MapOptions,

    // Footers
    pub powered_by_text: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            page_start_x: 10.0,
            page_start_y: 10.0,
            image_spacing: GALLERY_SPACING,
            image_oversample: IMAGE_OVERSAMPLE,
            header_rule_offset: 26.0,
            body_offset_first: 29.0,
            body_offset_continuation: 22.0,
            about_column_width: 112.0,
            column_gutter: 5.0,
            pagination: PaginationBudget::default(),
            cover: CoverOptions::default(),
            map: MapOptions::default(),
            powered_by_text: "Powered by ProjectMark".to_string(),
        }
    }
}

/// Cover and end page geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverOptions {
    pub image_width_px: u32,
    pub image_height_px: u32,
    /// Gap between the cover image and the details block
    pub details_gap: f32,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            image_width_px: 744,
            image_height_px: 685,
            details_gap: 10.0,
        }
    }
}

/// Map page and thumbnail grid geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapOptions {
    pub map_width_px: u32,
    pub map_height_px: u32,
    /// Space reserved for the page title above the map
    pub title_height_px: u32,
    pub thumbnail_width_px: u32,
    pub thumbnail_height_px: u32,
    pub thumbnail_image_height_px: u32,
    pub thumbnail_spacing: f32,
    pub thumbnail_columns: usize,
    pub thumbnails_per_page: usize,
    /// Distance between the thumbnail image and its label
    pub label_offset: f32,
    /// Pixel size of the stand-alone map export
    pub export_width_px: u32,
    pub export_height_px: u32,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            map_width_px: 676,
            map_height_px: 268,
            title_height_px: 60,
            thumbnail_width_px: 216,
            thumbnail_height_px: 195,
            thumbnail_image_height_px: 136,
            thumbnail_spacing: 4.0,
            thumbnail_columns: 3,
            thumbnails_per_page: 9,
            label_offset: 2.0,
            export_width_px: 1240,
            export_height_px: 1754,
        }
    }
}

impl ReportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse options: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Config(format!("Failed to serialize options: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page width and height
    pub fn page_size(&self) -> (f32, f32) {
        self.paper_size.dimensions_mm()
    }

    /// X position and width of the right-hand details column
    pub fn details_column(&self) -> (f32, f32) {
        let (page_width, _) = self.page_size();
        let x = self.page_start_x + self.about_column_width - self.column_gutter;
        (x, page_width - x - 2.0 * self.column_gutter)
    }

    /// Width of the left-hand about column
    pub fn about_column(&self) -> f32 {
        self.about_column_width - self.column_gutter
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(ReportError::Config(format!(
                "Page size must be positive, got {}x{}",
                width, height
            )));
        }

        if self.image_oversample == 0 {
            return Err(ReportError::Config(
                "Image oversample must be at least 1".to_string(),
            ));
        }

        if self.image_oversample > MAX_IMAGE_OVERSAMPLE {
            return Err(ReportError::Config(format!(
                "Image oversample must be at most {}",
                MAX_IMAGE_OVERSAMPLE
            )));
        }

        if self.about_column_width <= self.column_gutter {
            return Err(ReportError::Config(
                "About column must be wider than the column gutter".to_string(),
            ));
        }

        let (_, details_width) = self.details_column();
        if details_width <= 0.0 {
            return Err(ReportError::Config(
                "About column leaves no room for the details column".to_string(),
            ));
        }

        let budget = &self.pagination;
        if budget.single_page == 0 || budget.first_page == 0 || budget.continuation_page == 0 {
            return Err(ReportError::Config(
                "Pagination budgets must be greater than zero".to_string(),
            ));
        }

        let map = &self.map;
        if map.thumbnail_columns == 0 || map.thumbnails_per_page == 0 {
            return Err(ReportError::Config(
                "Map thumbnail columns and per-page count must be greater than zero".to_string(),
            ));
        }

        let pixel_sizes = [
            map.map_width_px,
            map.map_height_px,
            map.thumbnail_width_px,
            map.thumbnail_height_px,
            map.thumbnail_image_height_px,
            map.export_width_px,
            map.export_height_px,
            self.cover.image_width_px,
            self.cover.image_height_px,
        ];
        if pixel_sizes.contains(&0) {
            return Err(ReportError::Config(
                "Image and map pixel sizes must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PaperSize::A4 => serializer.serialize_str("A4"),
                PaperSize::Letter => serializer.serialize_str("Letter"),
                PaperSize::Custom {
                    width_mm,
                    height_mm,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_mm", width_mm)?;
                    s.serialize_field("height_mm", height_mm)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    match value {
                        "A4" => Ok(PaperSize::A4),
                        "Letter" => Ok(PaperSize::Letter),
                        _ => Err(de::Error::unknown_variant(value, &["A4", "Letter", "Custom"])),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_mm = None;
                    let mut height_mm = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_mm" => width_mm = Some(map.next_value()?),
                            "height_mm" => height_mm = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_mm, height_mm) {
                        (Some(w), Some(h)) => Ok(PaperSize::Custom {
                            width_mm: w,
                            height_mm: h,
                        }),
                        _ => Err(de::Error::missing_field("width_mm or height_mm")),
                    }
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }
}
