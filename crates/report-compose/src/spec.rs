//! Report description
//!
//! A [`ReportSpec`] is everything a build needs: the company profile, the
//! project catalogue with per-project display overrides, the optional
//! sections, and the cover/end page settings. It is loaded once and only read
//! during composition.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full input of one report build
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportSpec {
    pub title: String,
    pub author: String,
    pub slogan: String,

    pub company: Company,
    pub company_page: CompanyPage,
    pub sections: Vec<Section>,

    pub projects: Vec<Project>,
    pub selected_projects: Vec<u64>,
    pub project_overrides: BTreeMap<u64, ProjectOverride>,

    pub add_map: bool,
    pub add_org: bool,
    pub add_team: bool,
    pub add_appendix: bool,

    pub org_chart: OrgChart,
    pub team: Team,
    pub appendix: Appendix,

    pub cover: PageStyle,
    pub end_page: EndPage,
    /// Footer items shown after the author's name on content pages
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Company {
    pub name: String,
    pub address: String,
    pub about: String,
    pub description: String,
    pub logo: Option<String>,
    pub images: Vec<String>,
    pub email: String,
}

/// Display overrides for the company pages
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompanyPage {
    pub name: Option<String>,
    pub address: Option<String>,
    pub about: Option<String>,
    /// Pre-split description pages; used as-is when not empty
    pub descriptions: Vec<String>,
    pub images: Vec<String>,
    pub image_count: Option<usize>,
    pub details: Vec<DetailField>,
}

/// A titled value shown in a details column
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetailField {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Section {
    /// Name of the section template, used in progress labels
    pub template_title: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub about: String,
    pub description: String,
    pub details: String,
    pub main_image: Option<String>,
}

impl Section {
    /// Label shown while the section is composed
    pub fn label(&self) -> &str {
        if self.template_title.is_empty() {
            &self.title
        } else {
            &self.template_title
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
}

impl Project {
    /// Coordinates for a map marker. Missing or zero coordinates yield none.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Per-project display overrides
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectOverride {
    pub name: Option<String>,
    pub address: Option<String>,
    pub about: Option<String>,
    pub description: Option<String>,
    /// Pre-split description pages; used as-is when not empty
    pub descriptions: Vec<String>,
    pub images: Vec<String>,
    /// Single image, used when `images` is empty
    pub image: Option<String>,
    pub image_count: Option<usize>,
    /// Detail keys and whether they are shown, in display order
    pub details_config: IndexMap<String, bool>,
    /// Detail values by key
    pub details: IndexMap<String, DetailField>,
    pub custom_details: Vec<CustomDetail>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CustomDetail {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrgChart {
    pub title: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Team {
    pub title: String,
    pub groups: Vec<TeamGroup>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamGroup {
    pub title: String,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Appendix {
    pub title: String,
    pub description: String,
    pub entries: Vec<AppendixEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppendixEntry {
    pub title: String,
    pub description: String,
}

/// Image and colors of a full-bleed page
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageStyle {
    pub image: Option<String>,
    /// `rgb(...)` or `rgba(...)`
    pub text_color: Option<String>,
    /// `rgb(...)` or `rgba(...)`
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EndPage {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub style: PageStyle,
    pub slogan: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// A project with its overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProject<'a> {
    pub project: &'a Project,
    pub name: String,
    pub address: String,
    pub about: String,
    pub description: String,
    pub descriptions: Vec<String>,
    pub images: Vec<String>,
    pub image_count: usize,
    /// Enabled detail fields followed by custom details
    pub details: Vec<DetailField>,
    /// Image shown on the map thumbnail, if any
    pub thumbnail: Option<String>,
}

impl ReportSpec {
    /// Load a report description from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_slice(&bytes)
    }

    /// Parse a report description from JSON bytes
    #[cfg(feature = "serde")]
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse report: {}", e)))
    }

    /// Validate the description
    pub fn validate(&self) -> Result<()> {
        let colors = [
            &self.cover.text_color,
            &self.cover.background,
            &self.end_page.style.text_color,
            &self.end_page.style.background,
        ];
        for color in colors.into_iter().flatten() {
            Rgba::parse(color)?;
        }

        Ok(())
    }

    /// Selected projects, de-duplicated and ordered by id
    ///
    /// Selected ids without a matching project are ignored.
    pub fn selected_projects(&self) -> Vec<&Project> {
        let mut selected: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| self.selected_projects.contains(&p.id))
            .collect();
        selected.sort_by_key(|p| p.id);
        selected.dedup_by_key(|p| p.id);
        selected
    }

    /// Cover image, falling back to the company logo
    pub fn cover_image(&self) -> Option<&str> {
        self.cover
            .image
            .as_deref()
            .or(self.company.logo.as_deref())
    }

    /// End page image, falling back to the cover image
    pub fn end_image(&self) -> Option<&str> {
        self.end_page.style.image.as_deref().or(self.cover_image())
    }

    /// Company gallery images, falling back to the first three company images
    pub fn company_images(&self) -> Vec<String> {
        if self.company_page.images.is_empty() {
            self.company.images.iter().take(3).cloned().collect()
        } else {
            self.company_page.images.clone()
        }
    }

    pub fn company_image_count(&self) -> usize {
        self.company_page.image_count.unwrap_or(1)
    }

    pub fn company_name(&self) -> &str {
        self.company_page
            .name
            .as_deref()
            .unwrap_or(&self.company.name)
    }

    pub fn company_address(&self) -> &str {
        self.company_page
            .address
            .as_deref()
            .unwrap_or(&self.company.address)
    }

    pub fn company_about(&self) -> &str {
        self.company_page
            .about
            .as_deref()
            .unwrap_or(&self.company.about)
    }

    /// Apply the overrides recorded for `project`
    pub fn resolve_project<'a>(&'a self, project: &'a Project) -> ResolvedProject<'a> {
        let empty = ProjectOverride::default();
        let overrides = self.project_overrides.get(&project.id).unwrap_or(&empty);

        let name = overrides.name.clone().unwrap_or_else(|| project.name.clone());
        let about = overrides
            .about
            .clone()
            .unwrap_or_else(|| format!("About {}", name));

        let images = if overrides.images.is_empty() {
            let single = overrides
                .image
                .clone()
                .or_else(|| project.images.first().cloned())
                .unwrap_or_default();
            vec![single]
        } else {
            overrides.images.clone()
        };

        let mut details: Vec<DetailField> = overrides
            .details_config
            .iter()
            .filter(|(key, enabled)| **enabled && key.as_str() != "images")
            .map(|(key, _)| overrides.details.get(key).cloned().unwrap_or_default())
            .collect();
        details.extend(overrides.custom_details.iter().map(|custom| DetailField {
            title: custom.title.clone(),
            value: custom.content.clone(),
        }));

        let thumbnail = overrides
            .image
            .clone()
            .or_else(|| project.images.first().cloned())
            .filter(|image| !image.is_empty());

        ResolvedProject {
            project,
            address: overrides
                .address
                .clone()
                .unwrap_or_else(|| project.address.clone()),
            about,
            description: overrides
                .description
                .clone()
                .unwrap_or_else(|| project.description.clone()),
            descriptions: overrides.descriptions.clone(),
            images,
            image_count: overrides.image_count.unwrap_or(1),
            details,
            thumbnail,
            name,
        }
    }
}
