//! Built-in page fragment templates

use std::fmt;

use serde_json::{Map, Value};

use crate::markup::escape;
use crate::types::{ReportError, Result};

use super::FragmentRenderer;

/// Named page fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    CompanyHeader,
    CompanyAbout,
    CompanyAboutPage,
    Features,
    PageHeader,
    PageAbout,
    PageDetails,
    ProjectHeader,
    ProjectAbout,
    ProjectAboutPage,
    ProjectThumbnail,
    CoverDetails,
    OrgChartHeader,
    MapTitle,
    TeamTitle,
    TeamGroupTitle,
    TeamMember,
    AppendixTitle,
    AppendixEntryTitle,
    Footer,
    PoweredByFooter,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::CompanyHeader => "company-header",
            Template::CompanyAbout => "company-about",
            Template::CompanyAboutPage => "company-about-page",
            Template::Features => "features",
            Template::PageHeader => "page-header",
            Template::PageAbout => "page-about",
            Template::PageDetails => "page-details",
            Template::ProjectHeader => "project-header",
            Template::ProjectAbout => "project-about",
            Template::ProjectAboutPage => "project-about-page",
            Template::ProjectThumbnail => "project-thumbnail",
            Template::CoverDetails => "cover-details",
            Template::OrgChartHeader => "orgchart-header",
            Template::MapTitle => "map-title",
            Template::TeamTitle => "team-title",
            Template::TeamGroupTitle => "team-group-title",
            Template::TeamMember => "team-member",
            Template::AppendixTitle => "appendix-title",
            Template::AppendixEntryTitle => "appendix-entry-title",
            Template::Footer => "footer",
            Template::PoweredByFooter => "powered-by-footer",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders every [`Template`] into a small HTML fragment
///
/// Plain bindings are escaped. `description` and `details` bindings carry
/// markup and are inserted as-is. Missing bindings render as empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl FragmentRenderer for BuiltinTemplates {
    fn render(&self, template: Template, bindings: &Value) -> Result<String> {
        let Some(map) = bindings.as_object() else {
            return Err(ReportError::Render {
                template: template.name().to_string(),
                message: "bindings must be an object".to_string(),
            });
        };
        let b = Bindings(map);

        let html = match template {
            Template::CompanyHeader | Template::ProjectHeader => {
                format!("<h1>{}</h1>{}", b.text("name"), b.para("address"))
            }
            Template::CompanyAbout | Template::ProjectAbout | Template::PageAbout => {
                format!("<h3>{}</h3>{}", b.text("about"), b.raw("description"))
            }
            Template::CompanyAboutPage | Template::ProjectAboutPage => {
                b.raw("description").to_string()
            }
            Template::Features => b
                .list("details")
                .iter()
                .filter_map(Value::as_object)
                .map(|detail| {
                    let detail = Bindings(detail);
                    format!("<h4>{}</h4>{}", detail.text("title"), detail.para("value"))
                })
                .collect(),
            Template::PageHeader => {
                format!("<h1>{}</h1>{}", b.text("title"), b.para("subtitle"))
            }
            Template::PageDetails => b.raw("details").to_string(),
            Template::ProjectThumbnail | Template::TeamMember => {
                let secondary = if template == Template::TeamMember {
                    "role"
                } else {
                    "address"
                };
                format!("<h4>{}</h4>{}", b.text("name"), b.para(secondary))
            }
            Template::CoverDetails => {
                let mut html = format!("<h2>{}</h2>", b.text("company"));
                html.push_str(&format!("<h1>{}</h1>", b.text("title")));
                for key in ["slogan", "email", "address"] {
                    html.push_str(&b.para(key));
                }
                html
            }
            Template::OrgChartHeader => {
                format!("<h1>{}</h1>{}", b.text("title"), b.para("name"))
            }
            Template::MapTitle => format!("<h1>{}</h1>", b.text("title")),
            Template::TeamTitle | Template::AppendixTitle => {
                format!("<h2>{}</h2>", b.text("title"))
            }
            Template::TeamGroupTitle => format!("<h4>{}</h4>", b.text("title")),
            Template::AppendixEntryTitle => format!("<h3>{}</h3>", b.text("title")),
            Template::Footer => {
                let mut parts = vec![b.text("author")];
                parts.extend(
                    b.list("items")
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|item| !item.is_empty())
                        .map(escape),
                );
                parts.retain(|part| !part.is_empty());
                format!("<p>{}</p>", parts.join(" | "))
            }
            Template::PoweredByFooter => format!("<p>{}</p>", b.text("text")),
        };

        Ok(html)
    }
}

struct Bindings<'a>(&'a Map<String, Value>);

impl Bindings<'_> {
    /// Escaped text of a binding
    fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => escape(s),
            Some(Value::Null) | None => String::new(),
            Some(other) => escape(&other.to_string()),
        }
    }

    /// A `<p>` with the escaped binding, or nothing when it is empty
    fn para(&self, key: &str) -> String {
        let text = self.text(key);
        if text.is_empty() {
            text
        } else {
            format!("<p>{}</p>", text)
        }
    }

    fn raw(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    fn list(&self, key: &str) -> &[Value] {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_escapes_text() {
        let html = BuiltinTemplates
            .render(
                Template::ProjectHeader,
                &json!({"name": "A & B", "address": "<Main St>"}),
            )
            .unwrap();
        assert_eq!(html, "<h1>A &amp; B</h1><p>&lt;Main St&gt;</p>");
    }

    #[test]
    fn test_description_is_inserted_verbatim() {
        let html = BuiltinTemplates
            .render(
                Template::CompanyAbout,
                &json!({"about": "About", "description": "<p>x</p>"}),
            )
            .unwrap();
        assert_eq!(html, "<h3>About</h3><p>x</p>");
    }

    #[test]
    fn test_missing_bindings_render_empty() {
        let html = BuiltinTemplates
            .render(Template::PageHeader, &json!({}))
            .unwrap();
        assert_eq!(html, "<h1></h1>");
    }

    #[test]
    fn test_features_list() {
        let html = BuiltinTemplates
            .render(
                Template::Features,
                &json!({"details": [{"title": "Client", "value": "City"}, {"title": "Year"}]}),
            )
            .unwrap();
        assert_eq!(html, "<h4>Client</h4><p>City</p><h4>Year</h4>");
    }

    #[test]
    fn test_footer_joins_items() {
        let html = BuiltinTemplates
            .render(
                Template::Footer,
                &json!({"author": "Jo", "items": ["a@b.c", "", "555"]}),
            )
            .unwrap();
        assert_eq!(html, "<p>Jo | a@b.c | 555</p>");
    }

    #[test]
    fn test_non_object_bindings_fail() {
        let err = BuiltinTemplates
            .render(Template::MapTitle, &json!("nope"))
            .unwrap_err();
        assert!(matches!(err, ReportError::Render { .. }));
        assert!(err.is_collaborator_failure());
    }
}
