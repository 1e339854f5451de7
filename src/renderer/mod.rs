//! Card renderer: converts a measure into a self-contained SVG card.
//!
//! Layout decisions live in [`layout`]; this module only turns the
//! resulting primitives into SVG elements, one element per primitive, in
//! the order the layout produced them.

mod constants;
mod svg_builder;
mod staff;
pub mod layout;

use crate::config::CardConfig;
use crate::error::Result;
use crate::model::Measure;
use constants::*;
use svg_builder::SvgBuilder;
use staff::*;

pub use layout::{
    layout, layout_to_json, layout_with_mode, pair_stem_up, stem_up, CardGeometry, LayoutMode,
    Primitive,
};

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a measure as a card SVG.
///
/// `label` is printed in the top-left corner when the config asks for it;
/// callers usually pass the card number.
pub fn render_card_svg(label: Option<&str>, measure: &Measure, config: &CardConfig) -> Result<String> {
    let geometry = config.geometry()?;
    let primitives = layout_with_mode(measure, geometry.width, geometry.height, config.mode)?;
    log::debug!(
        "rendering '{}' as {} primitives on a {}x{} card",
        measure,
        primitives.len(),
        geometry.width,
        geometry.height
    );

    let mut svg = SvgBuilder::new(geometry.width, geometry.height);

    render_outline(&mut svg, &geometry);
    if config.show_label {
        if let Some(label) = label {
            render_label(&mut svg, &geometry, label);
        }
    }
    if config.show_columns {
        render_columns(&mut svg, &geometry);
    }
    for primitive in &primitives {
        render_primitive(&mut svg, &geometry, primitive);
    }

    Ok(svg.build())
}

fn render_primitive(svg: &mut SvgBuilder, geometry: &CardGeometry, primitive: &Primitive) {
    match primitive {
        Primitive::StaffLine { x1, x2, y } => {
            svg.line(*x1, *y, *x2, *y, STAFF_COLOR, geometry.scaled(STAFF_LINE_WIDTH));
        }
        Primitive::Notehead { x, y, r, filled: true } => {
            svg.circle(*x, *y, *r, NOTE_COLOR);
        }
        Primitive::Notehead { x, y, r, filled: false } => {
            svg.ring(*x, *y, *r, NOTE_COLOR, geometry.scaled(NOTEHEAD_STROKE_WIDTH));
        }
        Primitive::Stem { x, y1, y2, .. } => {
            svg.line(*x, *y1, *x, *y2, NOTE_COLOR, geometry.scaled(STEM_WIDTH));
        }
        Primitive::Beam { points } => {
            svg.polyline(points, NOTE_COLOR, geometry.scaled(STEM_WIDTH));
        }
    }
}
