use serde::{Deserialize, Serialize};

use super::note::Note;

/// One instrument track of the song: its notes plus mixer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: usize,
    pub name: String,
    pub notes: Vec<Note>,
    pub volume: f32, // 0.0 - 1.0
    pub pan: f32,    // -1.0 (left) - 1.0 (right)
    pub muted: bool,
    pub solo: bool,
}

impl Track {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: format!("Track {}", id + 1),
            notes: Vec::new(),
            volume: 0.8,
            pan: 0.0,
            muted: false,
            solo: false,
        }
    }

    pub fn adjust_volume(&mut self, delta: f32) -> f32 {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        self.volume
    }

    pub fn adjust_pan(&mut self, delta: f32) -> f32 {
        self.pan = (self.pan + delta).clamp(-1.0, 1.0);
        self.pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_defaults() {
        let t = Track::new(2);
        assert_eq!(t.name, "Track 3");
        assert_eq!(t.volume, 0.8);
        assert!(t.notes.is_empty());
    }

    #[test]
    fn volume_and_pan_clamp() {
        let mut t = Track::new(0);
        for _ in 0..10 {
            t.adjust_volume(0.05);
        }
        assert_eq!(t.volume, 1.0);
        for _ in 0..30 {
            t.adjust_pan(-0.1);
        }
        assert_eq!(t.pan, -1.0);
    }
}
