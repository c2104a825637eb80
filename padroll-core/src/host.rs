//! Collaborators the controller drives. The host application owns the song,
//! audio, transport and UI; the controller only sees these traits.

use crate::state::Track;

/// Access to the song's tracks and which one is being edited.
pub trait TrackStore {
    fn current_track_id(&self) -> usize;
    fn set_current_track_id(&mut self, id: usize);
    fn track(&self, id: usize) -> Option<&Track>;
    fn track_mut(&mut self, id: usize) -> Option<&mut Track>;
}

/// Fire-and-forget audio hooks.
pub trait AudioPreview {
    /// Lazily bring up the audio backend. Called before any playback starts.
    fn init(&mut self);
    fn resume(&mut self);
    fn play_note(&mut self, pitch: u8, seconds: f32, track_id: usize, velocity: u8);
    fn set_track_volume(&mut self, track_id: usize, volume: f32);
    fn set_track_pan(&mut self, track_id: usize, pan: f32);
}

pub trait GridView {
    /// Steps per 4-beat bar.
    fn grid_divisions(&self) -> u32;
    fn set_grid_divisions(&mut self, divisions: u32);
}

/// Undo storage lives in the host; the controller only asks for snapshots.
pub trait History {
    /// Snapshot the song before a mutation.
    fn save_state(&mut self);
    /// Returns false when there was nothing to undo.
    fn undo(&mut self) -> bool;
    /// Returns false when there was nothing to redo.
    fn redo(&mut self) -> bool;
}

pub trait Transport {
    fn is_playing(&self) -> bool;
    fn play_from(&mut self, beat: f64);
    fn stop(&mut self);
    fn is_looping(&self) -> bool;
    fn set_looping(&mut self, looping: bool);
    fn loop_region(&self) -> Option<(f64, f64)>;
    fn set_loop_region(&mut self, start: f64, end: f64);
}

/// UI notifications plus the auxiliary track list opened by a long START press.
pub trait Feedback {
    fn show_toast(&mut self, message: &str);
    fn update_status(&mut self, message: &str);
    fn open_aux_list(&mut self);
    fn close_aux_list(&mut self);
    fn aux_list_open(&self) -> bool;
}

/// Everything [`GamepadController::update`](crate::GamepadController::update) needs.
pub trait EditorHost:
    TrackStore + AudioPreview + GridView + History + Transport + Feedback
{
}

impl<T> EditorHost for T where
    T: TrackStore + AudioPreview + GridView + History + Transport + Feedback
{
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Minimal single-purpose host for unit tests.
    #[derive(Debug, Default)]
    pub struct FakeHost {
        pub tracks: Vec<Track>,
        pub current: usize,
        pub divisions: u32,
        pub saves: usize,
        pub previews: Vec<(u8, usize, u8)>,
        pub status: Vec<String>,
    }

    impl FakeHost {
        pub fn new() -> Self {
            Self {
                tracks: (0..2).map(Track::new).collect(),
                divisions: 4,
                ..Default::default()
            }
        }

        pub fn notes(&self) -> &[crate::state::Note] {
            &self.tracks[self.current].notes
        }
    }

    impl TrackStore for FakeHost {
        fn current_track_id(&self) -> usize {
            self.current
        }
        fn set_current_track_id(&mut self, id: usize) {
            self.current = id;
        }
        fn track(&self, id: usize) -> Option<&Track> {
            self.tracks.get(id)
        }
        fn track_mut(&mut self, id: usize) -> Option<&mut Track> {
            self.tracks.get_mut(id)
        }
    }

    impl AudioPreview for FakeHost {
        fn init(&mut self) {}
        fn resume(&mut self) {}
        fn play_note(&mut self, pitch: u8, _seconds: f32, track_id: usize, velocity: u8) {
            self.previews.push((pitch, track_id, velocity));
        }
        fn set_track_volume(&mut self, _track_id: usize, _volume: f32) {}
        fn set_track_pan(&mut self, _track_id: usize, _pan: f32) {}
    }

    impl GridView for FakeHost {
        fn grid_divisions(&self) -> u32 {
            self.divisions
        }
        fn set_grid_divisions(&mut self, divisions: u32) {
            self.divisions = divisions;
        }
    }

    impl History for FakeHost {
        fn save_state(&mut self) {
            self.saves += 1;
        }
        fn undo(&mut self) -> bool {
            false
        }
        fn redo(&mut self) -> bool {
            false
        }
    }

    impl Transport for FakeHost {
        fn is_playing(&self) -> bool {
            false
        }
        fn play_from(&mut self, _beat: f64) {}
        fn stop(&mut self) {}
        fn is_looping(&self) -> bool {
            false
        }
        fn set_looping(&mut self, _looping: bool) {}
        fn loop_region(&self) -> Option<(f64, f64)> {
            None
        }
        fn set_loop_region(&mut self, _start: f64, _end: f64) {}
    }

    impl Feedback for FakeHost {
        fn show_toast(&mut self, message: &str) {
            self.status.push(message.to_string());
        }
        fn update_status(&mut self, message: &str) {
            self.status.push(message.to_string());
        }
        fn open_aux_list(&mut self) {}
        fn close_aux_list(&mut self) {}
        fn aux_list_open(&self) -> bool {
            false
        }
    }
}
