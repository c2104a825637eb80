use serde::{Deserialize, Serialize};

/// Tolerance used when comparing note start times in beats.
pub const TIME_EPSILON: f64 = 0.001;

pub const MAX_PITCH: u8 = 127;
pub const MIN_VELOCITY: u8 = 1;
pub const MAX_VELOCITY: u8 = 127;

/// A single note on a track, positioned in beats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub time: f64,     // beats, >= 0
    pub pitch: u8,     // MIDI 0-127
    pub duration: f64, // beats, > 0
    pub velocity: u8,  // 1-127
}

impl Note {
    pub fn new(time: f64, pitch: u8, duration: f64, velocity: u8) -> Self {
        Self {
            time: time.max(0.0),
            pitch: pitch.min(MAX_PITCH),
            duration,
            velocity: velocity.clamp(MIN_VELOCITY, MAX_VELOCITY),
        }
    }

    pub fn end(&self) -> f64 {
        self.time + self.duration
    }

    /// True when the note starts at `pos` (epsilon on time, exact pitch).
    pub fn starts_at(&self, pos: Position) -> bool {
        (self.time - pos.time).abs() < TIME_EPSILON && self.pitch == pos.pitch
    }
}

/// A grid position: the edit cursor or a selection anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub time: f64,
    pub pitch: u8,
}

impl Position {
    pub fn new(time: f64, pitch: u8) -> Self {
        Self {
            time: time.max(0.0),
            pitch: pitch.min(MAX_PITCH),
        }
    }

    /// Offset by a time delta (beats) and a pitch delta (semitones), clamped to legal ranges.
    pub fn offset(self, dt: f64, dp: i32) -> Self {
        Self {
            time: (self.time + dt).max(0.0),
            pitch: clamp_pitch(self.pitch as i32 + dp),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            time: 0.0,
            pitch: 60, // C4
        }
    }
}

pub fn clamp_pitch(pitch: i32) -> u8 {
    pitch.clamp(0, MAX_PITCH as i32) as u8
}

pub fn clamp_velocity(velocity: i32) -> u8 {
    velocity.clamp(MIN_VELOCITY as i32, MAX_VELOCITY as i32) as u8
}

/// Round a beat value to 3 decimals so repeated grid steps don't accumulate float drift.
pub fn round_time(time: f64) -> f64 {
    (time * 1000.0).round() / 1000.0
}

/// Index of the first note starting at `pos`.
pub fn find_note_at(notes: &[Note], pos: Position) -> Option<usize> {
    notes.iter().position(|n| n.starts_at(pos))
}

/// MIDI note name for a given pitch (0-127)
pub fn note_name(pitch: u8) -> String {
    let names = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = (pitch / 12) as i8 - 1;
    let name = names[(pitch % 12) as usize];
    format!("{}{}", name, octave)
}
