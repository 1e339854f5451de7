//! Layout engine tests through the public API.

use cardscore::deck::STANDARD_MEASURES;
use cardscore::renderer::CardGeometry;
use cardscore::{decode, layout, layout_with_mode, CardError, CardNumber, LayoutMode, Primitive};
use pretty_assertions::assert_eq;

fn kinds(primitives: &[Primitive]) -> Vec<&'static str> {
    primitives
        .iter()
        .map(|p| match p {
            Primitive::StaffLine { .. } => "staff",
            Primitive::Notehead { .. } => "head",
            Primitive::Stem { .. } => "stem",
            Primitive::Beam { .. } => "beam",
        })
        .collect()
}

#[test]
fn layout_is_deterministic() {
    for code in STANDARD_MEASURES {
        let m = decode(code).unwrap();
        assert_eq!(layout(&m, 300.0, 200.0), layout(&m, 300.0, 200.0), "{code}");
    }
}

#[test]
fn every_catalog_measure_fills_four_slots() {
    for code in STANDARD_MEASURES {
        let m = decode(code).unwrap();
        let primitives = layout(&m, 300.0, 200.0).unwrap();
        let heads = primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Notehead { .. }))
            .count();
        assert_eq!(heads, m.len(), "{code}");

        // Notes stay inside the card.
        for p in &primitives {
            if let Primitive::Notehead { x, y, .. } = p {
                assert!(*x > 0.0 && *x < 300.0, "{code}: x={x}");
                assert!(*y > 0.0 && *y < 200.0, "{code}: y={y}");
            }
        }
    }
}

#[test]
fn primitive_sequence_for_mixed_measure() {
    let primitives = layout(&decode("5h4q4e1e").unwrap(), 300.0, 200.0).unwrap();
    let mut expected = vec!["staff"; 5];
    expected.extend(["head", "stem", "head", "stem", "head", "head", "beam"]);
    assert_eq!(kinds(&primitives), expected);
}

#[test]
fn flipping_a_card_changes_its_layout() {
    let m = decode("2h6q5q").unwrap();
    let number: CardNumber = "4001".parse().unwrap();
    let upside_down = number.flip_vertical().flip_horizontal();
    assert_eq!(upside_down.to_string(), "4004");

    let turned = upside_down.orientation().apply(&m);
    let a = layout(&m, 300.0, 200.0).unwrap();
    let b = layout(&turned, 300.0, 200.0).unwrap();
    assert_eq!(kinds(&a), kinds(&b));
    assert_ne!(a, b);
}

#[test]
fn non_reference_sizes_keep_proportions() {
    let g = CardGeometry::new(600.0, 100.0).unwrap();
    assert_eq!(g.slot_x(0), 120.0);
    assert_eq!(g.slot_x(3), 480.0);
    assert_eq!(g.staff_line_y(0), 20.0);
    assert_eq!(g.stem_length(), 32.5);
}

#[test]
fn legacy_mode_on_catalog_matches_strict() {
    for code in STANDARD_MEASURES {
        let m = decode(code).unwrap();
        assert_eq!(
            layout_with_mode(&m, 300.0, 200.0, LayoutMode::Legacy),
            layout(&m, 300.0, 200.0),
            "{code}"
        );
    }
}

#[test]
fn strict_mode_errors() {
    assert_eq!(
        layout(&decode("1e2q3q4q").unwrap(), 300.0, 200.0),
        Err(CardError::UnpairedEighth { index: 0 })
    );
    assert_eq!(
        layout(&decode("").unwrap(), 300.0, 200.0),
        Err(CardError::MalformedMeasure { beats: 0.0 })
    );
    assert!(matches!(
        layout(&decode("1q2q3q4q").unwrap(), -1.0, 200.0),
        Err(CardError::InvalidCardSize { .. })
    ));
}
