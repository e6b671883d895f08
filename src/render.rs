
use crate::catalog::{Catalog, CatalogError};
use crate::coordinates::{self, ViewportError, ViewportState};
use log::{debug, info, warn};
use serde_derive::Serialize;
use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;

/// brightest limiting magnitude used when sizing markers
const MAX_SIZING_MAGNITUDE: f64 = 15.0;
const MIN_MARKER_RADIUS: f64 = 1.0;
const MAX_MARKER_RADIUS: f64 = 8.0;
/// stars at least this much brighter than the limiting magnitude get a label
const LABEL_MAGNITUDE_MARGIN: f64 = 3.0;

/// Errors that abort a render pass before anything is drawn
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// one instruction for the drawing collaborator, in viewport pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DrawDirective {
    PlotPoint { x: i32, y: i32 },
    PlotDisc { x: i32, y: i32, radius: f64 },
    DrawLabel { x: i32, y: i32, text: String },
}

/// whatever actually puts pixels somewhere. A render pass only ever hands it directives
pub trait DrawingSurface {
    fn draw(&mut self, directive: DrawDirective);
}

impl DrawingSurface for Vec<DrawDirective> {
    fn draw(&mut self, directive: DrawDirective) {
        self.push(directive);
    }
}

/// counts of what happened during one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// records looked at, including ones that could not be read
    pub scanned: u64,
    /// stars bright enough to be drawn
    pub plotted: u64,
    pub labelled: u64,
    /// records skipped because they could not be read
    pub skipped: u64,
}

/// radius of the marker for a star, brighter stars get bigger discs
/// always within [1, 8]
pub fn marker_radius(limiting_magnitude: f64, magnitude: f64) -> f64 {
    let base = if limiting_magnitude <= MAX_SIZING_MAGNITUDE {
        limiting_magnitude
    } else {
        MAX_SIZING_MAGNITUDE
    };
    let size = base - magnitude + 0.5;
    if size.is_nan() {
        return MIN_MARKER_RADIUS;
    }
    size.clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS)
}

pub fn wants_label(limiting_magnitude: f64, magnitude: f64) -> bool {
    magnitude < limiting_magnitude - LABEL_MAGNITUDE_MARGIN
}

/// opens the catalog at path and runs one pass over it, see plan_pass
/// the catalog is closed again on every way out of here, viewport checks happen in plan_pass
pub fn render_pass<P: AsRef<Path>>(
    path: P,
    viewport: &ViewportState,
    surface: &mut impl DrawingSurface,
) -> Result<PassSummary, RenderError> {
    let mut catalog = Catalog::open(path)?;
    plan_pass(&mut catalog, viewport, surface)
}

/// walks the whole catalog once and emits directives for every star no fainter than the
/// limiting magnitude
/// failing to size up the catalog aborts the pass with nothing drawn, a record that cannot be
/// read is skipped and the scan goes on
pub fn plan_pass<R: Read + Seek>(
    catalog: &mut Catalog<R>,
    viewport: &ViewportState,
    surface: &mut impl DrawingSurface,
) -> Result<PassSummary, RenderError> {
    let viewport = viewport.validated()?;
    let count = catalog.record_count()?;
    debug!("render pass over {} stars with {:?}", count, viewport);

    let mut summary = PassSummary::default();
    for index in 1..=count {
        summary.scanned += 1;
        let star = match catalog.get_star(index) {
            Ok(star) => star,
            Err(e) => {
                warn!("skipping star {}: {}", index, e);
                summary.skipped += 1;
                continue;
            }
        };
        if star.magnitude > viewport.limiting_magnitude {
            continue;
        }

        let point = coordinates::project(&viewport, star.ra, star.dec);
        let size = marker_radius(viewport.limiting_magnitude, star.magnitude);
        if size == MIN_MARKER_RADIUS {
            surface.draw(DrawDirective::PlotPoint {
                x: point.x,
                y: point.y,
            });
        } else {
            surface.draw(DrawDirective::PlotDisc {
                x: point.x,
                y: point.y,
                radius: size,
            });
        }
        summary.plotted += 1;

        if wants_label(viewport.limiting_magnitude, star.magnitude) {
            // the label sits up and to the right of the marker, offset by its whole pixels
            let offset = size as i32;
            surface.draw(DrawDirective::DrawLabel {
                x: point.x.saturating_add(offset),
                y: point.y.saturating_sub(offset),
                text: star.display_label().to_string(),
            });
            summary.labelled += 1;
        }
    }

    info!(
        "render pass done: {} scanned, {} plotted, {} labelled, {} skipped",
        summary.scanned, summary.plotted, summary.labelled, summary.skipped
    );
    Ok(summary)
}
