//! Shared constants for the card renderer (SVG user units).
//!
//! Sizes are given for the reference 300×200 card. Positions scale with
//! the card's width and height; lengths and radii scale with its height.

// ── Card ────────────────────────────────────────────────────────────
pub(super) const DEFAULT_CARD_WIDTH: f64 = 300.0;
pub(super) const DEFAULT_CARD_HEIGHT: f64 = 200.0;
pub(super) const OUTLINE_WIDTH: f64 = 5.0;
pub(super) const OUTLINE_RADIUS: f64 = 15.0;
pub(super) const LABEL_X: f64 = 10.0;
pub(super) const LABEL_Y: f64 = 20.0;
pub(super) const LABEL_FONT_SIZE: f64 = 16.0;

// ── Beat slots ──────────────────────────────────────────────────────
pub(super) const BEAT_SLOTS: usize = 4;
/// Slot centers sit on the inner lines of a five-column grid.
pub(super) const SLOT_COLUMNS: f64 = 5.0;
pub(super) const COLUMN_DASH: &str = "3, 5";

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_LINES: usize = 5;
pub(super) const STAFF_TOP_RATIO: f64 = 0.2; // top line at 20% of the height
pub(super) const STAFF_GAP_RATIO: f64 = 0.15; // line gap as a share of the height
pub(super) const STAFF_LINE_WIDTH: f64 = 3.0;

// ── Notes ───────────────────────────────────────────────────────────
pub(super) const FILLED_NOTE_RADIUS: f64 = 9.0;
pub(super) const HOLLOW_NOTE_RADIUS: f64 = 7.0;
pub(super) const NOTEHEAD_STROKE_WIDTH: f64 = 4.0;
pub(super) const STEM_LENGTH: f64 = 65.0;
pub(super) const STEM_OFFSET: f64 = 7.0; // stem distance from notehead center
pub(super) const STEM_WIDTH: f64 = 4.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "black";
pub(super) const STAFF_COLOR: &str = "lightblue";
pub(super) const LABEL_FONT: &str = "Courier";
