//! Layout engine. Places a measure's notes on the card.
//!
//! The card has four beat slots. A quarter note sits on its slot's
//! center, a half note straddles two slots, and an eighth-note pair shares
//! one slot, one head either side of center, joined by a beam. Every
//! coordinate is resolved here; the renderer only draws what it is given.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};
use crate::model::{Duration, Measure, Note, STAFF_CENTER};
use super::constants::*;

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

/// One drawable element with resolved pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    StaffLine { x1: f64, x2: f64, y: f64 },
    Notehead { x: f64, y: f64, r: f64, filled: bool },
    Stem { x: f64, y1: f64, y2: f64, up: bool },
    /// Polyline down one stem, across the beam, and down the other stem.
    Beam { points: Vec<(f64, f64)> },
}

/// How the engine treats a measure that is not exactly four beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Reject it with an error.
    #[default]
    Strict,
    /// Lay out whatever fits in the four slots, as the card app always has.
    Legacy,
}

/// Card-size-dependent positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub width: f64,
    pub height: f64,
}

impl CardGeometry {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(CardError::InvalidCardSize { width, height });
        }
        Ok(Self { width, height })
    }

    fn scale(&self) -> f64 {
        self.height / DEFAULT_CARD_HEIGHT
    }

    pub fn slot_width(&self) -> f64 {
        self.width / SLOT_COLUMNS
    }

    /// Center of beat slot `slot` (0–3).
    pub fn slot_x(&self, slot: usize) -> f64 {
        self.slot_width() * (slot + 1) as f64
    }

    /// Position of guide column `column` (0–4), halfway between slots.
    pub fn column_x(&self, column: usize) -> f64 {
        self.slot_width() * (column as f64 + 0.5)
    }

    pub fn eighth_offset(&self) -> f64 {
        self.slot_width() / 4.0
    }

    pub fn half_offset(&self) -> f64 {
        self.slot_width() / 2.0
    }

    fn staff_gap(&self) -> f64 {
        self.height * STAFF_GAP_RATIO
    }

    /// Staff line `line`, counted from the top.
    pub fn staff_line_y(&self, line: usize) -> f64 {
        self.height * STAFF_TOP_RATIO + line as f64 * self.staff_gap()
    }

    /// Vertical center of a note at staff position `pitch`.
    pub fn pitch_y(&self, pitch: u8) -> f64 {
        self.staff_line_y(STAFF_LINES - 1) - pitch as f64 * self.staff_gap() / 2.0
    }

    pub fn stem_length(&self) -> f64 {
        STEM_LENGTH * self.scale()
    }

    pub fn stem_offset(&self) -> f64 {
        STEM_OFFSET * self.scale()
    }

    pub fn notehead_radius(&self, duration: Duration) -> f64 {
        let r = match duration {
            Duration::Half => HOLLOW_NOTE_RADIUS,
            Duration::Quarter | Duration::Eighth => FILLED_NOTE_RADIUS,
        };
        r * self.scale()
    }

    pub(super) fn scaled(&self, length: f64) -> f64 {
        length * self.scale()
    }

    fn stem_x(&self, x: f64, up: bool) -> f64 {
        if up {
            x + self.stem_offset()
        } else {
            x - self.stem_offset()
        }
    }

    fn stem_end_y(&self, y: f64, up: bool) -> f64 {
        if up {
            y - self.stem_length()
        } else {
            y + self.stem_length()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Stem direction
// ═══════════════════════════════════════════════════════════════════════

/// Notes below the middle line take an up stem.
pub fn stem_up(pitch: u8) -> bool {
    pitch < STAFF_CENTER
}

/// Shared stem direction of an eighth pair: the note farther from the
/// middle line decides, and a tie goes to the first note.
pub fn pair_stem_up(first: u8, second: u8) -> bool {
    let distance = |p: u8| (p as i32 - STAFF_CENTER as i32).abs();
    if distance(first) < distance(second) {
        stem_up(second)
    } else {
        stem_up(first)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Layout
// ═══════════════════════════════════════════════════════════════════════

/// Lay out a well-formed measure on a `width`×`height` card.
pub fn layout(measure: &Measure, width: f64, height: f64) -> Result<Vec<Primitive>> {
    layout_with_mode(measure, width, height, LayoutMode::Strict)
}

/// Lay out a measure, choosing how malformed measures are handled.
///
/// Output order is staff lines first, then each note or eighth pair left
/// to right, so notes draw on top of the staff.
pub fn layout_with_mode(
    measure: &Measure,
    width: f64,
    height: f64,
    mode: LayoutMode,
) -> Result<Vec<Primitive>> {
    let geometry = CardGeometry::new(width, height)?;

    if let Err(err) = measure.validate() {
        match mode {
            LayoutMode::Strict => return Err(err),
            LayoutMode::Legacy => log::warn!("laying out malformed measure '{measure}': {err}"),
        }
    }

    let mut primitives = staff_lines(&geometry);
    let notes = measure.notes();
    let mut next = 0;
    let mut slot = 0;

    while slot < BEAT_SLOTS {
        let Some(&note) = notes.get(next) else {
            break;
        };
        let x = geometry.slot_x(slot);

        match note.duration() {
            Duration::Eighth => {
                if let Some(&second) = notes.get(next + 1) {
                    primitives.extend(eighth_pair(&geometry, x, note, second));
                    next += 2;
                } else {
                    primitives.extend(single_note(&geometry, x - geometry.eighth_offset(), note));
                    next += 1;
                }
                slot += 1;
            }
            Duration::Half => {
                primitives.extend(single_note(&geometry, x + geometry.half_offset(), note));
                next += 1;
                slot += 2;
            }
            Duration::Quarter => {
                primitives.extend(single_note(&geometry, x, note));
                next += 1;
                slot += 1;
            }
        }
    }

    if next < notes.len() {
        log::warn!(
            "{} note(s) of '{measure}' fall past the fourth beat and were dropped",
            notes.len() - next
        );
    }

    Ok(primitives)
}

fn staff_lines(geometry: &CardGeometry) -> Vec<Primitive> {
    (0..STAFF_LINES)
        .map(|line| Primitive::StaffLine {
            x1: 0.0,
            x2: geometry.width,
            y: geometry.staff_line_y(line),
        })
        .collect()
}

/// Notehead and stem for a quarter or half note (or a stray eighth).
fn single_note(geometry: &CardGeometry, x: f64, note: Note) -> [Primitive; 2] {
    let y = geometry.pitch_y(note.pitch());
    let up = stem_up(note.pitch());
    let stem_x = geometry.stem_x(x, up);
    [
        Primitive::Notehead {
            x,
            y,
            r: geometry.notehead_radius(note.duration()),
            filled: note.duration() != Duration::Half,
        },
        Primitive::Stem {
            x: stem_x,
            y1: y,
            y2: geometry.stem_end_y(y, up),
            up,
        },
    ]
}

/// Two noteheads either side of the slot center and the beam joining them.
fn eighth_pair(geometry: &CardGeometry, x: f64, first: Note, second: Note) -> [Primitive; 3] {
    let up = pair_stem_up(first.pitch(), second.pitch());
    let (x1, x2) = (x - geometry.eighth_offset(), x + geometry.eighth_offset());
    let (y1, y2) = (geometry.pitch_y(first.pitch()), geometry.pitch_y(second.pitch()));
    let (sx1, sx2) = (geometry.stem_x(x1, up), geometry.stem_x(x2, up));
    let r = geometry.notehead_radius(Duration::Eighth);

    [
        Primitive::Notehead { x: x1, y: y1, r, filled: true },
        Primitive::Notehead { x: x2, y: y2, r, filled: true },
        Primitive::Beam {
            points: vec![
                (sx1, y1),
                (sx1, geometry.stem_end_y(y1, up)),
                (sx2, geometry.stem_end_y(y2, up)),
                (sx2, y2),
            ],
        },
    ]
}

/// Serialize a layout for a renderer outside this crate.
pub fn layout_to_json(primitives: &[Primitive]) -> String {
    serde_json::to_string(primitives).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    const W: f64 = DEFAULT_CARD_WIDTH;
    const H: f64 = DEFAULT_CARD_HEIGHT;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn heads(primitives: &[Primitive]) -> Vec<(f64, f64, bool)> {
        primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Notehead { x, y, filled, .. } => Some((*x, *y, *filled)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reference_card_geometry() {
        let g = CardGeometry::new(W, H).unwrap();
        let slots: Vec<f64> = (0..4).map(|s| g.slot_x(s)).collect();
        assert_eq!(slots, vec![60.0, 120.0, 180.0, 240.0]);
        for (line, expected) in [40.0, 70.0, 100.0, 130.0, 160.0].iter().enumerate() {
            assert!(close(g.staff_line_y(line), *expected));
        }
        assert!(close(g.pitch_y(0), 160.0));
        assert!(close(g.pitch_y(4), 100.0));
        assert!(close(g.pitch_y(8), 40.0));
        assert!(close(g.eighth_offset(), 15.0));
        assert!(close(g.half_offset(), 30.0));
        assert!(close(g.stem_length(), 65.0));
    }

    #[test]
    fn stem_direction_threshold() {
        assert!(stem_up(0));
        assert!(stem_up(3));
        assert!(!stem_up(4));
        assert!(!stem_up(8));
    }

    #[test]
    fn pair_stem_follows_farther_note() {
        // 4 is on the middle line, 1 is three steps below it.
        assert!(pair_stem_up(4, 1));
        assert!(!pair_stem_up(1, 7));
        // Equal distance: first note wins.
        assert!(pair_stem_up(2, 6));
        assert!(!pair_stem_up(6, 2));
    }

    #[test]
    fn four_quarters_give_thirteen_primitives() {
        let primitives = layout(&decode("1q2q3q4q").unwrap(), W, H).unwrap();
        assert_eq!(primitives.len(), 13);
        assert!(primitives[..5].iter().all(|p| matches!(p, Primitive::StaffLine { .. })));
        let xs: Vec<f64> = heads(&primitives).iter().map(|h| h.0).collect();
        assert_eq!(xs, vec![60.0, 120.0, 180.0, 240.0]);
    }

    #[test]
    fn half_quarter_and_eighth_pair() {
        let primitives = layout(&decode("5h4q4e1e").unwrap(), W, H).unwrap();
        assert_eq!(primitives.len(), 5 + 2 + 2 + 3);

        let h = heads(&primitives);
        assert_eq!(h.len(), 4);
        assert_eq!((h[0].0, h[0].2), (90.0, false));
        assert_eq!((h[1].0, h[1].2), (180.0, true));
        assert_eq!((h[2].0, h[3].0), (225.0, 255.0));

        match primitives.last() {
            Some(Primitive::Beam { points }) => {
                assert_eq!(points.len(), 4);
                // Pitch 1 is farther from center than 4, so the pair stems up.
                assert!(close(points[0].0, 232.0));
                assert!(close(points[1].1, 100.0 - 65.0));
                assert!(close(points[3].0, 262.0));
            }
            other => panic!("expected a beam, got {other:?}"),
        }
    }

    #[test]
    fn stems_sit_beside_noteheads() {
        let primitives = layout(&decode("1q6q1e5e2e4e").unwrap(), W, H).unwrap();
        let stems: Vec<(f64, f64, f64, bool)> = primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Stem { x, y1, y2, up } => Some((*x, *y1, *y2, *up)),
                _ => None,
            })
            .collect();
        assert_eq!(stems.len(), 2);
        assert_eq!(stems[0], (67.0, 145.0, 80.0, true));
        assert_eq!(stems[1], (113.0, 70.0, 135.0, false));
    }

    #[test]
    fn half_note_is_hollow_and_smaller() {
        let primitives = layout(&decode("4h4q5q").unwrap(), W, H).unwrap();
        match &primitives[5] {
            Primitive::Notehead { r, filled, .. } => {
                assert_eq!(*r, HOLLOW_NOTE_RADIUS);
                assert!(!filled);
            }
            other => panic!("expected a notehead, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_rejects_malformed_measures() {
        assert_eq!(
            layout(&decode("1q2q3q").unwrap(), W, H),
            Err(CardError::MalformedMeasure { beats: 3.0 })
        );
        assert_eq!(
            layout(&decode("1q2e3q4q5q").unwrap(), W, H),
            Err(CardError::UnpairedEighth { index: 1 })
        );
    }

    #[test]
    fn legacy_mode_leaves_empty_slots() {
        let m = decode("1q2q3q").unwrap();
        let primitives = layout_with_mode(&m, W, H, LayoutMode::Legacy).unwrap();
        assert_eq!(primitives.len(), 5 + 6);
    }

    #[test]
    fn legacy_mode_drops_notes_past_the_last_slot() {
        let m = decode("1q2q3q4q5q").unwrap();
        let primitives = layout_with_mode(&m, W, H, LayoutMode::Legacy).unwrap();
        assert_eq!(heads(&primitives).len(), 4);
    }

    #[test]
    fn legacy_mode_lets_a_late_half_note_overrun() {
        let m = decode("1q2q3q4h").unwrap();
        let primitives = layout_with_mode(&m, W, H, LayoutMode::Legacy).unwrap();
        let last = heads(&primitives).last().copied();
        assert_eq!(last.map(|h| h.0), Some(270.0));
    }

    #[test]
    fn legacy_mode_draws_trailing_lone_eighth() {
        let m = decode("1q2q3q4e").unwrap();
        let primitives = layout_with_mode(&m, W, H, LayoutMode::Legacy).unwrap();
        assert_eq!(primitives.len(), 5 + 8);
        assert_eq!(heads(&primitives).last().map(|h| h.0), Some(225.0));
    }

    #[test]
    fn invalid_card_size() {
        let m = decode("1q2q3q4q").unwrap();
        assert_eq!(
            layout(&m, 0.0, H),
            Err(CardError::InvalidCardSize { width: 0.0, height: H })
        );
        assert!(layout(&m, W, f64::NAN).is_err());
    }

    #[test]
    fn geometry_scales_with_card_size() {
        let m = decode("1q2q3q4q").unwrap();
        let primitives = layout(&m, 2.0 * W, 2.0 * H).unwrap();
        let xs: Vec<f64> = heads(&primitives).iter().map(|h| h.0).collect();
        assert_eq!(xs, vec![120.0, 240.0, 360.0, 480.0]);
        match &primitives[6] {
            Primitive::Stem { y1, y2, .. } => assert!(close(y1 - y2, 130.0)),
            other => panic!("expected a stem, got {other:?}"),
        }
    }

    #[test]
    fn layout_json_is_tagged() {
        let primitives = layout(&decode("4h4h").unwrap(), W, H).unwrap();
        let json = layout_to_json(&primitives);
        assert!(json.starts_with(r#"[{"kind":"staff_line""#));
        assert!(json.contains(r#""kind":"notehead""#));
        assert!(json.contains(r#""kind":"stem""#));
    }
}
