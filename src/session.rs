use serde::{Deserialize, Serialize};

use padroll_core::state::grid::DEFAULT_DIVISIONS;
use padroll_core::{AudioPreview, Feedback, GridView, History, Track, TrackStore, Transport};

use crate::undo::{UndoHistory, DEFAULT_LIMIT};

/// The note data that undo/redo snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub tracks: Vec<Track>,
}

impl Song {
    pub fn new(track_count: usize) -> Self {
        Self {
            tracks: (0..track_count).map(Track::new).collect(),
        }
    }
}

/// In-memory editor state that the controller drives: song, grid, history, transport.
#[derive(Debug)]
pub struct Session {
    pub song: Song,
    pub current_track: usize,
    pub grid_divisions: u32,
    history: UndoHistory<Song>,
    pub playing: bool,
    pub play_position: f64,
    pub looping: bool,
    pub loop_region: Option<(f64, f64)>,
    pub aux_list_open: bool,
    pub last_toast: Option<String>,
    pub last_status: Option<String>,
    audio_ready: bool,
}

impl Session {
    pub fn new(track_count: usize) -> Self {
        Self {
            song: Song::new(track_count),
            current_track: 0,
            grid_divisions: DEFAULT_DIVISIONS,
            history: UndoHistory::new(DEFAULT_LIMIT),
            playing: false,
            play_position: 0.0,
            looping: false,
            loop_region: None,
            aux_list_open: false,
            last_toast: None,
            last_status: None,
            audio_ready: false,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }
}

impl TrackStore for Session {
    fn current_track_id(&self) -> usize {
        self.current_track
    }

    fn set_current_track_id(&mut self, id: usize) {
        self.current_track = id;
    }

    fn track(&self, id: usize) -> Option<&Track> {
        self.song.tracks.get(id)
    }

    fn track_mut(&mut self, id: usize) -> Option<&mut Track> {
        self.song.tracks.get_mut(id)
    }
}

impl AudioPreview for Session {
    fn init(&mut self) {
        if !self.audio_ready {
            log::debug!("Audio initialized");
            self.audio_ready = true;
        }
    }

    fn resume(&mut self) {}

    fn play_note(&mut self, pitch: u8, seconds: f32, track_id: usize, velocity: u8) {
        log::debug!(
            "Preview pitch {} for {}s on track {} (vel {})",
            pitch, seconds, track_id, velocity
        );
    }

    fn set_track_volume(&mut self, track_id: usize, volume: f32) {
        log::debug!("Track {} volume {:.2}", track_id, volume);
    }

    fn set_track_pan(&mut self, track_id: usize, pan: f32) {
        log::debug!("Track {} pan {:.1}", track_id, pan);
    }
}

impl GridView for Session {
    fn grid_divisions(&self) -> u32 {
        self.grid_divisions
    }

    fn set_grid_divisions(&mut self, divisions: u32) {
        self.grid_divisions = divisions;
    }
}

impl History for Session {
    fn save_state(&mut self) {
        self.history.save(self.song.clone());
    }

    fn undo(&mut self) -> bool {
        match self.history.undo(&self.song) {
            Some(prev) => {
                self.song = prev;
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.history.redo(&self.song) {
            Some(next) => {
                self.song = next;
                true
            }
            None => false,
        }
    }
}

impl Transport for Session {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play_from(&mut self, beat: f64) {
        self.playing = true;
        self.play_position = beat;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn loop_region(&self) -> Option<(f64, f64)> {
        self.loop_region
    }

    fn set_loop_region(&mut self, start: f64, end: f64) {
        self.loop_region = Some((start, end));
    }
}

impl Feedback for Session {
    fn show_toast(&mut self, message: &str) {
        log::info!("{}", message);
        self.last_toast = Some(message.to_string());
    }

    fn update_status(&mut self, message: &str) {
        log::info!("{}", message);
        self.last_status = Some(message.to_string());
    }

    fn open_aux_list(&mut self) {
        self.aux_list_open = true;
    }

    fn close_aux_list(&mut self) {
        self.aux_list_open = false;
    }

    fn aux_list_open(&self) -> bool {
        self.aux_list_open
    }
}
