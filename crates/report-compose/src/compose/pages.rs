//! Page builders, one per composition stage

use serde_json::json;

use crate::canvas::{Align, TextCell};
use crate::collab::{GeoPoint, Template};
use crate::constants::TEAM_AVATAR_PX;
use crate::layout::{
    GalleryFamily, GridSpec, Rect, contain_fit, team_layout, to_page_units, walk_grid,
};
use crate::paginate::{Chunk, paginate_with};
use crate::spec::{DetailField, Project};
use crate::types::{PageKind, Result, Rgba};

use super::context::ComposeContext;
use super::sequence::ComposedPage;

// =============================================================================
// Cover and End
// =============================================================================

struct FullBleed<'a> {
    kind: PageKind,
    image: Option<&'a str>,
    text_color: Option<&'a str>,
    background: Option<&'a str>,
    details: serde_json::Value,
}

pub fn cover(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating cover page");
    let spec = ctx.spec;
    full_bleed_page(
        ctx,
        FullBleed {
            kind: PageKind::Cover,
            image: spec.cover_image(),
            text_color: spec.cover.text_color.as_deref(),
            background: spec.cover.background.as_deref(),
            details: json!({
                "company": spec.company.name,
                "title": spec.title,
                "slogan": spec.slogan,
            }),
        },
    )
}

pub fn end(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating last page");
    let spec = ctx.spec;
    let end = &spec.end_page;
    full_bleed_page(
        ctx,
        FullBleed {
            kind: PageKind::End,
            image: spec.end_image(),
            text_color: end.style.text_color.as_deref(),
            background: end.style.background.as_deref(),
            details: json!({
                "company": spec.company.name,
                "title": end.slogan.as_deref().unwrap_or_default(),
                "email": end.email,
                "address": end.address,
            }),
        },
    )
}

fn full_bleed_page(ctx: &mut ComposeContext<'_>, page: FullBleed<'_>) -> Result<()> {
    let composed = ComposedPage::new(page.kind, ctx.spec.title.clone());
    let footer = match page.kind {
        PageKind::End => Some(ctx.powered_by_footer.clone()),
        _ => None,
    };
    ctx.begin_page(&composed, footer);

    let (page_width, page_height) = ctx.canvas.page_size();
    if let Some(background) = page.background {
        ctx.canvas.set_fill_color(Rgba::parse(background)?);
        ctx.canvas
            .fill_rect(Rect::new(0.0, 0.0, page_width, page_height));
    }

    let cover = ctx.options.cover;
    match page.image.filter(|image| !image.is_empty()) {
        Some(reference) => {
            let image =
                ctx.resolve_image(reference, cover.image_width_px, cover.image_height_px)?;
            ctx.draw_image_at(&image, 0.0, 0.0, cover.image_width_px, cover.image_height_px);
        }
        None => log::warn!("No image for the {} page", page.kind),
    }

    if let Some(color) = page.text_color {
        ctx.canvas.set_text_color(Rgba::parse(color)?);
    }

    let details = ctx.render(Template::CoverDetails, page.details)?;
    let y = to_page_units(cover.image_height_px as f32) + cover.details_gap;
    ctx.canvas
        .write_cell(&TextCell::new(&details, ctx.options.page_start_x, y));

    ctx.finish_page(composed);
    Ok(())
}

// =============================================================================
// Company, Sections and Projects
// =============================================================================

/// Text regions of a gallery page
struct BodyText {
    header: String,
    about: String,
    details: String,
}

/// Gallery, header, rule and the two text columns
fn gallery_page(
    ctx: &mut ComposeContext<'_>,
    mut page: ComposedPage,
    family: GalleryFamily,
    image_count: usize,
    images: &[String],
    body: impl FnOnce(&ComposeContext<'_>) -> Result<BodyText>,
) -> Result<()> {
    let footer = Some(ctx.user_footer.clone());
    ctx.begin_page(&page, footer);

    let gallery = ctx.draw_gallery(family, image_count, images)?;
    let text = body(ctx)?;
    let options = ctx.options;
    let top = gallery.height;

    ctx.canvas
        .write_cell(&TextCell::new(&text.header, options.page_start_x, top));
    ctx.draw_rule(top + options.header_rule_offset);

    let about_offset = if page.index == 0 {
        options.body_offset_first
    } else {
        options.body_offset_continuation
    };
    ctx.canvas.write_cell(
        &TextCell::new(&text.about, options.page_start_x, top + about_offset)
            .width(options.about_column()),
    );

    let (details_x, details_width) = options.details_column();
    ctx.canvas.write_cell(
        &TextCell::new(&text.details, details_x, top + options.body_offset_first)
            .width(details_width),
    );

    page.gallery = Some(gallery);
    ctx.finish_page(page);
    Ok(())
}

/// Pre-split pages when given, otherwise the paginated description
fn description_chunks(
    ctx: &ComposeContext<'_>,
    presplit: &[String],
    description: &str,
) -> Vec<Chunk> {
    if presplit.is_empty() {
        paginate_with(description, &ctx.options.pagination)
    } else {
        presplit.iter().map(Chunk::new).collect()
    }
}

fn detail_bindings(details: &[DetailField]) -> serde_json::Value {
    details
        .iter()
        .map(|detail| json!({ "title": detail.title, "value": detail.value }))
        .collect()
}

pub fn company(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating company page");
    let spec = ctx.spec;

    let chunks = description_chunks(
        ctx,
        &spec.company_page.descriptions,
        &spec.company.description,
    );
    let images = spec.company_images();
    log::info!("Company description spans {} page(s)", chunks.len());

    for (index, chunk) in chunks.into_iter().enumerate() {
        let page = ComposedPage {
            index,
            chunk: Some(chunk.clone()),
            ..ComposedPage::new(PageKind::Company, spec.company_name())
        };
        gallery_page(
            ctx,
            page,
            GalleryFamily::Company,
            spec.company_image_count(),
            &images,
            |ctx| {
                let about = if index == 0 {
                    ctx.render(
                        Template::CompanyAbout,
                        json!({ "about": spec.company_about(), "description": chunk.markup }),
                    )?
                } else {
                    ctx.render(
                        Template::CompanyAboutPage,
                        json!({ "description": chunk.markup }),
                    )?
                };
                Ok(BodyText {
                    header: ctx.render(
                        Template::CompanyHeader,
                        json!({ "name": spec.company_name(), "address": spec.company_address() }),
                    )?,
                    about,
                    details: ctx.render(
                        Template::Features,
                        json!({ "details": detail_bindings(&spec.company_page.details) }),
                    )?,
                })
            },
        )?;
    }

    Ok(())
}

pub fn sections(ctx: &mut ComposeContext<'_>) -> Result<()> {
    let spec = ctx.spec;

    for section in &spec.sections {
        ctx.step(&format!("Generating section {} page", section.label()));

        let images = vec![section.main_image.clone().unwrap_or_default()];
        let page = ComposedPage::new(PageKind::Section, section.title.clone());
        gallery_page(ctx, page, GalleryFamily::Company, 1, &images, |ctx| {
            Ok(BodyText {
                header: ctx.render(
                    Template::PageHeader,
                    json!({ "title": section.title, "subtitle": section.subtitle }),
                )?,
                about: ctx.render(
                    Template::PageAbout,
                    json!({ "about": section.about, "description": section.description }),
                )?,
                details: ctx.render(Template::PageDetails, json!({ "details": section.details }))?,
            })
        })?;
    }

    Ok(())
}

pub fn projects(ctx: &mut ComposeContext<'_>) -> Result<()> {
    let spec = ctx.spec;

    for project in spec.selected_projects() {
        ctx.step(&format!("Generating project page: {}", project.name));

        let resolved = spec.resolve_project(project);
        let chunks = description_chunks(ctx, &resolved.descriptions, &resolved.description);
        let details = detail_bindings(&resolved.details);

        for (index, chunk) in chunks.into_iter().enumerate() {
            let page = ComposedPage {
                index,
                chunk: Some(chunk.clone()),
                ..ComposedPage::new(PageKind::Project, resolved.name.clone())
            };
            gallery_page(
                ctx,
                page,
                GalleryFamily::Project,
                resolved.image_count,
                &resolved.images,
                |ctx| {
                    let about = if index == 0 {
                        ctx.render(
                            Template::ProjectAbout,
                            json!({ "about": resolved.about, "description": chunk.markup }),
                        )?
                    } else {
                        ctx.render(
                            Template::ProjectAboutPage,
                            json!({ "description": chunk.markup }),
                        )?
                    };
                    Ok(BodyText {
                        header: ctx.render(
                            Template::ProjectHeader,
                            json!({ "name": resolved.name, "address": resolved.address }),
                        )?,
                        about,
                        details: ctx.render(Template::Features, json!({ "details": details }))?,
                    })
                },
            )?;
        }
    }

    Ok(())
}

// =============================================================================
// Map
// =============================================================================

/// Marker positions of the projects that have coordinates
pub fn project_points(projects: &[&Project]) -> Vec<GeoPoint> {
    projects
        .iter()
        .filter_map(|project| project.coordinates())
        .map(|(lat, lng)| GeoPoint { lat, lng })
        .collect()
}

pub fn map(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating project map");
    let spec = ctx.spec;
    let options = ctx.options;
    let map = options.map;

    let projects = spec.selected_projects();
    let title_height = to_page_units(map.title_height_px as f32);
    let map_rect = Rect::new(
        options.page_start_x,
        options.page_start_y + title_height,
        to_page_units(map.map_width_px as f32),
        to_page_units(map.map_height_px as f32),
    );
    let grid = GridSpec {
        origin: (
            options.page_start_x,
            map_rect.bottom() + map.thumbnail_spacing,
        ),
        cell_width: to_page_units(map.thumbnail_width_px as f32),
        cell_height: to_page_units(map.thumbnail_height_px as f32),
        spacing: map.thumbnail_spacing,
        columns: map.thumbnail_columns,
        per_page: map.thumbnails_per_page,
    };
    let title = ctx.render(Template::MapTitle, json!({ "title": "Our Presence" }))?;

    for (index, grid_page) in walk_grid(&projects, &grid).into_iter().enumerate() {
        let page = ComposedPage {
            index,
            ..ComposedPage::new(PageKind::Map, "Our Presence")
        };
        let footer = Some(ctx.user_footer.clone());
        ctx.begin_page(&page, footer);
        ctx.canvas.write_flow(&title, Align::Center);

        let on_page: Vec<&Project> = grid_page.cells().map(|cell| *cell.item).collect();
        let points = project_points(&on_page);
        let oversample = options.image_oversample;
        let raster = ctx.collab.maps.render_map(
            &points,
            map.map_width_px * oversample,
            map.map_height_px * oversample,
        )?;
        ctx.canvas.draw_image(&raster, map_rect);

        for cell in grid_page.cells() {
            let resolved = spec.resolve_project(cell.item);
            let image_rect = Rect::new(
                cell.rect.x,
                cell.rect.y,
                cell.rect.width,
                to_page_units(map.thumbnail_image_height_px as f32),
            );
            let image = ctx.resolve_or_placeholder(
                resolved.thumbnail.as_deref(),
                map.thumbnail_width_px,
                map.thumbnail_image_height_px,
                &format!("project thumbnail '{}'", resolved.name),
            )?;
            let label = ctx.render(
                Template::ProjectThumbnail,
                json!({ "name": resolved.name, "address": resolved.address }),
            )?;

            ctx.canvas.start_clip(cell.rect);
            ctx.canvas.draw_image(&image, image_rect);
            ctx.canvas.write_cell(
                &TextCell::new(&label, cell.rect.x, image_rect.bottom() + map.label_offset)
                    .width(cell.rect.width),
            );
            ctx.canvas.end_clip();
        }

        ctx.finish_page(page);
    }

    Ok(())
}

// =============================================================================
// Org Chart, Team and Appendix
// =============================================================================

pub fn org_chart(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating Org Chart");
    let spec = ctx.spec;
    let chart = &spec.org_chart;

    let page = ComposedPage::new(PageKind::Org, chart.title.clone());
    let footer = Some(ctx.user_footer.clone());
    ctx.begin_page(&page, footer);

    let header = ctx.render(
        Template::OrgChartHeader,
        json!({ "title": chart.title, "name": chart.name }),
    )?;
    ctx.canvas.write_cell(
        &TextCell::new(&header, ctx.options.page_start_x, ctx.options.page_start_y)
            .align(Align::Center),
    );

    match chart.image.as_deref().filter(|image| !image.is_empty()) {
        Some(reference) => {
            let (width, height) = ctx.collab.images.dimensions(reference)?;
            let (page_width, page_height) = ctx.canvas.page_size();
            let fit = contain_fit(page_width, page_height, width as f32, height as f32);

            // Request the pixel size the chart is drawn at
            let width_px = (fit.width / to_page_units(1.0)).round().max(1.0) as u32;
            let height_px = (fit.height / to_page_units(1.0)).round().max(1.0) as u32;
            let image = ctx.resolve_image(reference, width_px, height_px)?;
            ctx.canvas.draw_image(
                &image,
                Rect::new(fit.offset_x, fit.offset_y, fit.width, fit.height),
            );
        }
        None => log::warn!("Org chart has no image; only the header is drawn"),
    }

    ctx.finish_page(page);
    Ok(())
}

pub fn team(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating Team Section");
    let spec = ctx.spec;
    let team = &spec.team;

    let page = ComposedPage::new(PageKind::Team, team.title.clone());
    let footer = Some(ctx.user_footer.clone());
    ctx.begin_page(&page, footer);

    let title = ctx.render(Template::TeamTitle, json!({ "title": team.title }))?;
    ctx.canvas.write_flow(&title, Align::Left);
    ctx.canvas.ln(4.0);

    let sizes: Vec<usize> = team.groups.iter().map(|group| group.members.len()).collect();
    let cards = team_layout(&sizes);
    let mut cards = cards.iter().peekable();

    for (group_index, group) in team.groups.iter().enumerate() {
        let group_title = ctx.render(Template::TeamGroupTitle, json!({ "title": group.title }))?;
        ctx.canvas.write_flow(&group_title, Align::Left);

        while let Some(card) = cards.next_if(|card| card.group == group_index) {
            let member = &group.members[card.member];
            let avatar = ctx.resolve_or_placeholder(
                member.image.as_deref(),
                TEAM_AVATAR_PX,
                TEAM_AVATAR_PX,
                &format!("team member '{}'", member.name),
            )?;
            let (x, y) = card.avatar;
            ctx.draw_image_at(&avatar, x, y, TEAM_AVATAR_PX, TEAM_AVATAR_PX);

            let text = ctx.render(
                Template::TeamMember,
                json!({ "name": member.name, "role": member.role }),
            )?;
            ctx.canvas
                .write_cell(&TextCell::new(&text, card.text.0, card.text.1));
        }

        ctx.canvas.ln(10.0);
    }

    ctx.finish_page(page);
    Ok(())
}

pub fn appendix(ctx: &mut ComposeContext<'_>) -> Result<()> {
    ctx.step("Generating Appendix Page");
    let spec = ctx.spec;
    let appendix = &spec.appendix;

    let page = ComposedPage::new(PageKind::Appendix, appendix.title.clone());
    let footer = Some(ctx.user_footer.clone());
    ctx.begin_page(&page, footer);

    let title = ctx.render(Template::AppendixTitle, json!({ "title": appendix.title }))?;
    ctx.canvas.write_flow(&title, Align::Left);
    ctx.canvas.ln(5.0);
    ctx.canvas.write_flow(&appendix.description, Align::Left);
    ctx.canvas.ln(5.0);

    for entry in &appendix.entries {
        ctx.canvas.ln(3.0);
        let entry_title =
            ctx.render(Template::AppendixEntryTitle, json!({ "title": entry.title }))?;
        ctx.canvas.write_flow(&entry_title, Align::Left);
        ctx.canvas.ln(3.0);
        ctx.canvas.write_flow(&entry.description, Align::Left);
    }

    ctx.finish_page(page);
    Ok(())
}
