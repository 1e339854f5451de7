//! Card chrome: outline, label, and beat-column guides.
//!
//! Staff lines are part of the layout itself; see `layout.rs`.

use super::constants::*;
use super::layout::CardGeometry;
use super::svg_builder::SvgBuilder;

pub(super) fn render_outline(svg: &mut SvgBuilder, geometry: &CardGeometry) {
    svg.rounded_rect(
        geometry.width,
        geometry.height,
        geometry.scaled(OUTLINE_RADIUS),
        STAFF_COLOR,
        geometry.scaled(OUTLINE_WIDTH),
    );
}

pub(super) fn render_label(svg: &mut SvgBuilder, geometry: &CardGeometry, label: &str) {
    svg.text(
        geometry.scaled(LABEL_X),
        geometry.scaled(LABEL_Y),
        label,
        geometry.scaled(LABEL_FONT_SIZE),
        LABEL_FONT,
        NOTE_COLOR,
    );
}

/// Dashed guides bracketing each beat slot.
pub(super) fn render_columns(svg: &mut SvgBuilder, geometry: &CardGeometry) {
    for column in 0..=BEAT_SLOTS {
        let x = geometry.column_x(column);
        svg.dashed_line(x, 0.0, x, geometry.height, STAFF_COLOR, COLUMN_DASH);
    }
}
