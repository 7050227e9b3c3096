//! Page assembly
//!
//! The driver walks the document outline stage by stage and hands each
//! stage to its page builder. Builders draw through the [`Canvas`] and record
//! every physical page in a [`PageSequence`].

mod context;
mod pages;
mod sequence;
mod stage;

pub use context::{Collaborators, ComposeContext};
pub use pages::project_points;
pub use sequence::{ComposedPage, PageSequence};
pub use stage::{Stage, StageFlags, stage_plan, total_steps};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::canvas::{Canvas, DocumentInfo, LopdfCanvas};
use crate::collab::{
    BuiltinTemplates, FsImageResolver, MapProvider, MarkerMapProvider, ProgressSink,
    ResolvedImage,
};
use crate::options::ReportOptions;
use crate::spec::ReportSpec;
use crate::types::Result;

/// Label of the final progress notification
pub const SAVE_LABEL: &str = "Saving generated PDF";

/// Compose the whole report onto `canvas`
pub fn compose_report<'a>(
    spec: &'a ReportSpec,
    options: &'a ReportOptions,
    collab: Collaborators<'a>,
    canvas: &'a mut dyn Canvas,
) -> Result<PageSequence> {
    spec.validate()?;
    options.validate()?;

    canvas.set_document_info(&DocumentInfo {
        title: spec.title.clone(),
        author: spec.author.clone(),
        subject: spec.title.clone(),
    });

    let flags = StageFlags::from_spec(spec);
    let mut ctx = ComposeContext::new(spec, options, collab, canvas, total_steps(spec))?;

    let mut stage = Stage::Cover;
    while stage != Stage::Done {
        log::info!("Composing {}", stage);
        run_stage(&mut ctx, stage)?;
        stage = stage.next(flags);
    }

    log::info!(
        "Composed {} page(s) in {} step(s)",
        ctx.pages.len(),
        ctx.steps_taken()
    );
    Ok(ctx.pages)
}

fn run_stage(ctx: &mut ComposeContext<'_>, stage: Stage) -> Result<()> {
    match stage {
        Stage::Cover => pages::cover(ctx),
        Stage::CompanySet => pages::company(ctx),
        Stage::SectionSet => pages::sections(ctx),
        Stage::Map => pages::map(ctx),
        Stage::ProjectSet => pages::projects(ctx),
        Stage::Org => pages::org_chart(ctx),
        Stage::Team => pages::team(ctx),
        Stage::Appendix => pages::appendix(ctx),
        Stage::End => pages::end(ctx),
        Stage::Done => Ok(()),
    }
}

/// Compose the report into a PDF and return its bytes
pub fn build_document(
    spec: &ReportSpec,
    options: &ReportOptions,
    collab: Collaborators<'_>,
) -> Result<(PageSequence, Vec<u8>)> {
    let (page_width, page_height) = options.page_size();
    let mut canvas = LopdfCanvas::new(page_width, page_height);
    let pages = compose_report(spec, options, collab, &mut canvas)?;

    let total = total_steps(spec);
    collab.progress.notify(SAVE_LABEL, total - 1, total);
    let bytes = canvas.finish()?;

    log::info!("Generated {} bytes across {} page(s)", bytes.len(), pages.len());
    Ok((pages, bytes))
}

/// Generate the report and write it to `output`
///
/// Images are resolved relative to `assets`. The output file is only written
/// once the whole document has been produced.
pub async fn generate_report(
    spec: ReportSpec,
    options: ReportOptions,
    assets: impl Into<PathBuf>,
    output: impl AsRef<Path>,
    progress: Arc<dyn ProgressSink>,
) -> Result<PageSequence> {
    let assets = assets.into();

    let (pages, bytes) = tokio::task::spawn_blocking(move || {
        let renderer = BuiltinTemplates;
        let images = FsImageResolver::new(assets);
        let maps = MarkerMapProvider;
        let collab = Collaborators {
            renderer: &renderer,
            images: &images,
            maps: &maps,
            progress: progress.as_ref(),
        };
        build_document(&spec, &options, collab)
    })
    .await??;

    tokio::fs::write(output, bytes).await?;
    Ok(pages)
}

// =============================================================================
// Stand-alone Map
// =============================================================================

/// Marker map of every selected project, at the export size
pub fn company_map(
    spec: &ReportSpec,
    options: &ReportOptions,
    maps: &dyn MapProvider,
) -> Result<ResolvedImage> {
    let points = project_points(&spec.selected_projects());
    log::info!("Rendering company map with {} marker(s)", points.len());
    maps.render_map(
        &points,
        options.map.export_width_px,
        options.map.export_height_px,
    )
}

/// Render the company map and write it to `output` as PNG
pub async fn export_map(
    spec: &ReportSpec,
    options: &ReportOptions,
    output: impl AsRef<Path>,
) -> Result<()> {
    let spec = spec.clone();
    let options = options.clone();

    let png = tokio::task::spawn_blocking(move || {
        company_map(&spec, &options, &MarkerMapProvider)?.to_png()
    })
    .await??;

    tokio::fs::write(output, png).await?;
    Ok(())
}
