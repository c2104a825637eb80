use serde::{Deserialize, Serialize};

use super::note::{clamp_pitch, Note, Position};

/// How copied pitches are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardPitch {
    /// Paste keeps each note's original pitch.
    #[default]
    Absolute,
    /// Pitch is stored relative to the lowest copied pitch and re-anchored at the cursor.
    Relative,
}

/// Pitch of a copied note, per [`ClipboardPitch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipPitch {
    Absolute(u8),
    Offset(i16), // pitch - anchor_pitch
}

/// A note stored with its time relative to the copy anchor.
/// anchor = min time of the copied notes (and min pitch when pitch-relative)
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardNote {
    pub time_offset: f64, // time - anchor_time, >= 0
    pub pitch: ClipPitch,
    pub duration: f64,
    pub velocity: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    notes: Vec<ClipboardNote>,
}

impl Clipboard {
    /// Build templates from the copied notes. Returns `None` when nothing was copied.
    pub fn from_notes<'a, I>(notes: I, pitch_mode: ClipboardPitch) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Note>,
    {
        let notes: Vec<&Note> = notes.into_iter().collect();
        if notes.is_empty() {
            return None;
        }
        let anchor_time = notes.iter().map(|n| n.time).fold(f64::INFINITY, f64::min);
        let anchor_pitch = notes.iter().map(|n| n.pitch).min().unwrap_or(0);

        let notes = notes
            .into_iter()
            .map(|n| ClipboardNote {
                time_offset: n.time - anchor_time,
                pitch: match pitch_mode {
                    ClipboardPitch::Absolute => ClipPitch::Absolute(n.pitch),
                    ClipboardPitch::Relative => {
                        ClipPitch::Offset(n.pitch as i16 - anchor_pitch as i16)
                    }
                },
                duration: n.duration,
                velocity: n.velocity,
            })
            .collect();
        Some(Self { notes })
    }

    pub fn notes(&self) -> &[ClipboardNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// New notes anchored at `at`, clamped to time >= 0 and pitch 0-127.
    pub fn materialize(&self, at: Position) -> Vec<Note> {
        self.notes
            .iter()
            .map(|cn| {
                let pitch = match cn.pitch {
                    ClipPitch::Absolute(p) => p,
                    ClipPitch::Offset(offset) => clamp_pitch(at.pitch as i32 + offset as i32),
                };
                Note {
                    time: (at.time + cn.time_offset).max(0.0),
                    pitch,
                    duration: cn.duration,
                    velocity: cn.velocity,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Note> {
        vec![Note::new(2.0, 64, 1.0, 100), Note::new(3.5, 60, 0.5, 80)]
    }

    fn copy(pitch: ClipboardPitch) -> Clipboard {
        Clipboard::from_notes(&sample(), pitch).unwrap()
    }

    #[test]
    fn empty_copy_yields_none() {
        let none: Vec<Note> = Vec::new();
        let clip = Clipboard::from_notes(&none, ClipboardPitch::Absolute);
        assert!(clip.is_none());
    }

    #[test]
    fn absolute_paste_preserves_offsets_and_pitch() {
        let clip = copy(ClipboardPitch::Absolute);
        assert_eq!(clip.len(), 2);

        let pasted = clip.materialize(Position::new(5.0, 40));
        assert_eq!(pasted[0], Note::new(5.0, 64, 1.0, 100));
        assert_eq!(pasted[1], Note::new(6.5, 60, 0.5, 80));
    }

    #[test]
    fn relative_paste_anchors_lowest_pitch_at_cursor() {
        let clip = copy(ClipboardPitch::Relative);
        let pasted = clip.materialize(Position::new(0.0, 72));
        assert_eq!(pasted[0].pitch, 76);
        assert_eq!(pasted[1].pitch, 72);
    }

    #[test]
    fn relative_paste_clamps_pitch() {
        let clip = copy(ClipboardPitch::Relative);
        let pasted = clip.materialize(Position::new(0.0, 125));
        assert_eq!(pasted[0].pitch, 127);
        assert_eq!(pasted[1].pitch, 125);
    }
}
