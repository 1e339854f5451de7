//! cardscore: measure codec and notation layout for Compose Yourself
//! music cards.
//!
//! A card carries one 4/4 measure written as a short code such as
//! `"5h4q4e1e"`. This crate decodes those codes, applies the four card
//! orientations, lays the notes out on a staff, and renders the card as SVG.
//!
//! # Example
//! ```
//! use cardscore::{render_card_to_svg, CardConfig, Deck};
//!
//! let svg = render_card_to_svg("1004", &Deck::standard(), &CardConfig::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod codec;
pub mod composition;
pub mod config;
pub mod deck;
pub mod error;
pub mod midi;
pub mod model;
pub mod orientation;
pub mod playback;
pub mod renderer;

#[cfg(target_os = "android")]
pub mod android;

pub use codec::{decode, encode, invert_pitch, reverse_time};
pub use composition::{Overflow, Phrase, Score};
pub use config::CardConfig;
pub use deck::{Card, Deck};
pub use error::{CardError, Result};
pub use midi::{generate_midi, MidiOptions};
pub use model::{Duration, Measure, Note};
pub use orientation::{CardNumber, Orientation};
pub use playback::{player_notes, sequence_player_notes, PlayerNote};
pub use renderer::{layout, layout_to_json, layout_with_mode, render_card_svg, LayoutMode, Primitive};

/// Decode a measure code and render it as a card.
/// The code itself is used as the card label.
pub fn render_measure_to_svg(code: &str, config: &CardConfig) -> Result<String> {
    let measure = decode(code)?;
    render_card_svg(Some(code), &measure, config)
}

/// Look up a card number such as `"1003"` in a deck and render that card
/// in the orientation the number names.
pub fn render_card_to_svg(card_number: &str, deck: &Deck, config: &CardConfig) -> Result<String> {
    let number: CardNumber = card_number.parse()?;
    let measure = deck.measure_for(&number)?;
    log::debug!("card {number} shows '{measure}'");
    render_card_svg(Some(&number.to_string()), &measure, config)
}

/// Lay out a measure code with the config's card size and mode and
/// return the primitives as JSON. For renderers outside this crate.
pub fn layout_measure_to_json(code: &str, config: &CardConfig) -> Result<String> {
    let measure = decode(code)?;
    let primitives = layout_with_mode(&measure, config.width, config.height, config.mode)?;
    Ok(layout_to_json(&primitives))
}

/// MIDI file for a run of measures played back to back.
pub fn measures_to_midi(measures: &[Measure], options: &MidiOptions) -> Vec<u8> {
    let notes: Vec<Note> = measures.iter().flat_map(|m| m.notes().to_vec()).collect();
    generate_midi(&notes, options)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read a C string argument, or `None` if it is null or not UTF-8.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => CString::new(s).unwrap_or_default().into_raw(),
        Err(err) => {
            log::debug!("ffi call failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Render a card from the standard deck by card number (e.g. `"1004"`).
/// The caller must free the returned string with `cardscore_free_string`.
///
/// `width` and `height` set the card size; pass 0.0 for the defaults.
///
/// # Safety
/// `card_number` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn cardscore_render_card(
    card_number: *const c_char,
    width: f64,
    height: f64,
) -> *mut c_char {
    let Some(number) = (unsafe { c_str_arg(card_number) }) else {
        return std::ptr::null_mut();
    };
    let config = CardConfig::with_size(width, height);
    into_c_string(render_card_to_svg(number, &Deck::standard(), &config))
}

/// Render a measure code (e.g. `"5h4q4e1e"`) as a card SVG.
/// The caller must free the returned string with `cardscore_free_string`.
///
/// # Safety
/// `code` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn cardscore_render_measure(
    code: *const c_char,
    width: f64,
    height: f64,
) -> *mut c_char {
    let Some(code) = (unsafe { c_str_arg(code) }) else {
        return std::ptr::null_mut();
    };
    let config = CardConfig::with_size(width, height);
    into_c_string(render_measure_to_svg(code, &config))
}

/// Lay out a measure code and return the primitives as JSON.
/// The caller must free the returned string with `cardscore_free_string`.
///
/// # Safety
/// `code` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn cardscore_layout_json(
    code: *const c_char,
    width: f64,
    height: f64,
) -> *mut c_char {
    let Some(code) = (unsafe { c_str_arg(code) }) else {
        return std::ptr::null_mut();
    };
    let config = CardConfig::with_size(width, height);
    into_c_string(layout_measure_to_json(code, &config))
}

/// Free a string previously returned by cardscore functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a cardscore function, or null.
#[no_mangle]
pub unsafe extern "C" fn cardscore_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
