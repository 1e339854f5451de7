//! MIDI file generation for card measures, phrases, and scores.
//!
//! Produces a Standard MIDI File (SMF) Type 1 as raw bytes. Track 0 holds
//! the tempo and the 4/4 time signature; track 1 is the melody, one note
//! after another with no rests.

use crate::model::{Duration, Note};

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Options controlling MIDI output.
#[derive(Debug, Clone)]
pub struct MidiOptions {
    pub tempo_bpm: f64,
    pub channel: u8,
    /// General MIDI program (0 = Acoustic Grand Piano).
    pub program: u8,
    pub velocity: u8,
}

impl Default for MidiOptions {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            channel: 0,
            program: 0,
            velocity: 80,
        }
    }
}

/// A single MIDI event (note on/off, program change, meta event).
#[derive(Debug, Clone)]
pub struct MidiEvent {
    /// Absolute time in ticks from the start of the track
    pub tick: u32,
    /// Raw MIDI message bytes (status + data)
    pub bytes: Vec<u8>,
}

/// Ticks per quarter note in our MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Length of a duration in ticks.
pub fn duration_ticks(duration: Duration) -> u32 {
    duration.eighths() * (TICKS_PER_QUARTER as u32 / 2)
}

/// Generate a complete Standard MIDI File (SMF Type 1).
pub fn generate_midi(notes: &[Note], options: &MidiOptions) -> Vec<u8> {
    let tracks = vec![
        build_tempo_track(options.tempo_bpm),
        encode_track(&melody_events(notes, options), "Melody"),
    ];
    build_smf(&tracks)
}

// ═══════════════════════════════════════════════════════════════════════
// Melody extraction
// ═══════════════════════════════════════════════════════════════════════

fn melody_events(notes: &[Note], options: &MidiOptions) -> Vec<MidiEvent> {
    let channel = options.channel.min(15);
    let velocity = options.velocity.min(127);
    let mut events = vec![MidiEvent {
        tick: 0,
        bytes: vec![0xC0 | channel, options.program.min(127)],
    }];

    let mut tick = 0u32;
    for note in notes {
        let key = note.midi_key();
        let end = tick + duration_ticks(note.duration());
        events.push(MidiEvent {
            tick,
            bytes: vec![0x90 | channel, key, velocity],
        });
        events.push(MidiEvent {
            tick: end,
            bytes: vec![0x80 | channel, key, 0],
        });
        tick = end;
    }
    events
}

// ═══════════════════════════════════════════════════════════════════════
// SMF byte encoding
// ═══════════════════════════════════════════════════════════════════════

/// Build the complete Standard MIDI File bytes.
fn build_smf(tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();

    // MThd header
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes()); // header length
    out.extend_from_slice(&1u16.to_be_bytes()); // format type 1
    out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());

    for track_data in tracks {
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
        out.extend_from_slice(track_data);
    }

    out
}

/// Track 0: one tempo event and a 4/4 time signature.
fn build_tempo_track(tempo_bpm: f64) -> Vec<u8> {
    let bpm = if tempo_bpm > 0.0 { tempo_bpm } else { 120.0 };
    let uspq = (60_000_000.0 / bpm) as u32; // microseconds per quarter
    let events = vec![
        // FF 51 03 tt tt tt
        MidiEvent {
            tick: 0,
            bytes: vec![
                0xFF,
                0x51,
                0x03,
                ((uspq >> 16) & 0xFF) as u8,
                ((uspq >> 8) & 0xFF) as u8,
                (uspq & 0xFF) as u8,
            ],
        },
        // FF 58 04 nn dd cc bb: 4/4, 24 clocks per click, 8 32nds per quarter
        MidiEvent {
            tick: 0,
            bytes: vec![0xFF, 0x58, 0x04, 4, 2, 24, 8],
        },
    ];

    encode_track(&events, "Tempo")
}

/// Encode a track's events into raw MTrk bytes (delta-time encoded).
fn encode_track(events: &[MidiEvent], name: &str) -> Vec<u8> {
    let mut data = Vec::new();

    // Track name meta event
    let name_bytes = name.as_bytes();
    data.push(0x00); // delta time 0
    data.push(0xFF);
    data.push(0x03); // track name
    write_vlq(&mut data, name_bytes.len() as u32);
    data.extend_from_slice(name_bytes);

    // Stable sort keeps a note-off ahead of the next note-on at the same tick.
    let mut sorted: Vec<&MidiEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.tick);

    let mut last_tick: u32 = 0;
    for event in &sorted {
        let delta = event.tick.saturating_sub(last_tick);
        write_vlq(&mut data, delta);
        data.extend_from_slice(&event.bytes);
        last_tick = event.tick;
    }

    // End of track
    data.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    data
}

/// Write a variable-length quantity (VLQ) to a byte vector.
fn write_vlq(out: &mut Vec<u8>, mut value: u32) {
    if value == 0 {
        out.push(0);
        return;
    }
    let mut buf = [0u8; 5];
    let mut i = 0;
    while value > 0 {
        buf[i] = (value & 0x7F) as u8;
        value >>= 7;
        if i > 0 {
            buf[i] |= 0x80;
        }
        i += 1;
    }
    for j in (0..i).rev() {
        out.push(buf[j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn vlq_encoding() {
        let mut buf = Vec::new();
        write_vlq(&mut buf, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        write_vlq(&mut buf, 127);
        assert_eq!(buf, vec![0x7F]);

        buf.clear();
        write_vlq(&mut buf, 128);
        assert_eq!(buf, vec![0x81, 0x00]);

        buf.clear();
        write_vlq(&mut buf, 480);
        assert_eq!(buf, vec![0x83, 0x60]);
    }

    #[test]
    fn smf_header_valid() {
        let smf = generate_midi(&[], &MidiOptions::default());
        assert_eq!(&smf[0..4], b"MThd");
        assert_eq!(&smf[8..10], &1u16.to_be_bytes()); // format 1
        assert_eq!(&smf[10..12], &2u16.to_be_bytes()); // two tracks
        assert_eq!(&smf[12..14], &TICKS_PER_QUARTER.to_be_bytes());
        assert_eq!(smf.windows(4).filter(|w| *w == b"MTrk").count(), 2);
    }

    #[test]
    fn note_lengths_in_ticks() {
        assert_eq!(duration_ticks(Duration::Eighth), 240);
        assert_eq!(duration_ticks(Duration::Quarter), 480);
        assert_eq!(duration_ticks(Duration::Half), 960);
    }

    #[test]
    fn melody_events_are_back_to_back() {
        let measure = decode("5h4q4e1e").unwrap();
        let events = melody_events(measure.notes(), &MidiOptions::default());
        // program change + on/off per note
        assert_eq!(events.len(), 1 + 2 * 4);
        let ons: Vec<(u32, u8)> = events
            .iter()
            .filter(|e| e.bytes[0] & 0xF0 == 0x90)
            .map(|e| (e.tick, e.bytes[1]))
            .collect();
        assert_eq!(ons, vec![(0, 72), (960, 71), (1440, 71), (1680, 65)]);
    }

    #[test]
    fn default_tempo_is_120() {
        let track = build_tempo_track(120.0);
        // 500_000 us per quarter = 0x07A120
        assert!(track.windows(6).any(|w| w == &[0xFFu8, 0x51, 0x03, 0x07, 0xA1, 0x20]));
        assert!(track.windows(4).any(|w| w == &[0xFFu8, 0x58, 0x04, 4]));
    }
}
