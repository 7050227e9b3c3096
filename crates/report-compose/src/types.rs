use std::fmt;
use thiserror::Error;

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Template '{template}' failed to render: {message}")]
    Render { template: String, message: String },
    #[error("Image '{reference}' could not be resolved: {message}")]
    Image { reference: String, message: String },
    #[error("Map generation failed: {0}")]
    Map(String),
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

impl ReportError {
    /// True when the error came from a collaborator (renderer, image
    /// resolver, map provider) rather than from configuration or I/O.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            ReportError::Render { .. }
                | ReportError::Image { .. }
                | ReportError::Map(_)
                | ReportError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// An RGB color with opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in 0.0..=1.0
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS-like `rgb(r, g, b)` or `rgba(r, g, b, a)` string.
    ///
    /// Opacity defaults to 1 when absent.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || ReportError::Config(format!("Invalid color '{}'", value));

        let trimmed = value.trim();
        let body = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }

        let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
        let a = match parts.get(3) {
            Some(alpha) => alpha.parse::<f32>().map_err(|_| invalid())?,
            None => 1.0,
        };
        if !(0.0..=1.0).contains(&a) {
            return Err(invalid());
        }

        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a,
        })
    }

    /// Components as PDF color operands (0.0..=1.0)
    pub fn unit_components(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// The closed set of document colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Gray,
    White,
}

const BLACK: Rgba = Rgba::rgb(43, 46, 52);
const GRAY: Rgba = Rgba::rgb(133, 134, 138);
const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// Resolve a named document color
pub fn named_color(color: NamedColor) -> Rgba {
    match color {
        NamedColor::Black => BLACK,
        NamedColor::Gray => GRAY,
        NamedColor::White => WHITE,
    }
}

impl NamedColor {
    pub fn rgba(self) -> Rgba {
        named_color(self)
    }
}

/// Page sizes for the generated document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions in page units
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (A4_WIDTH_MM, A4_HEIGHT_MM),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Kind of a physical page in the finished document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PageKind {
    Cover,
    Company,
    Section,
    Project,
    Map,
    Org,
    Team,
    Appendix,
    End,
}

impl PageKind {
    pub fn name(self) -> &'static str {
        match self {
            PageKind::Cover => "cover",
            PageKind::Company => "company",
            PageKind::Section => "section",
            PageKind::Project => "project",
            PageKind::Map => "map",
            PageKind::Org => "org",
            PageKind::Team => "team",
            PageKind::Appendix => "appendix",
            PageKind::End => "end",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
