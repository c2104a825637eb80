#![allow(dead_code)]

use padroll_core::{
    AudioPreview, ControllerConfig, ControllerSnapshot, Feedback, GamepadController, GridView,
    History, MemoryStore, Note, Position, TickOutcome, Track, TrackStore, Transport,
};

// Default physical indices
pub const A: usize = 0;
pub const B: usize = 1;
pub const X: usize = 2;
pub const Y: usize = 3;
pub const L1: usize = 4;
pub const R1: usize = 5;
pub const L2: usize = 6;
pub const R2: usize = 7;
pub const SELECT: usize = 8;
pub const START: usize = 9;
pub const UP: usize = 12;
pub const DOWN: usize = 13;
pub const LEFT: usize = 14;
pub const RIGHT: usize = 15;

/// Frame interval used by [`Pad`].
pub const FRAME_MS: u64 = 16;

/// Host that records every collaborator call.
#[derive(Debug)]
pub struct MockHost {
    pub tracks: Vec<Track>,
    pub current: usize,
    pub divisions: u32,
    pub saves: usize,
    pub undo_available: bool,
    pub undos: usize,
    pub redos: usize,
    pub audio_inits: usize,
    pub previews: Vec<(u8, f32, usize, u8)>,
    pub volumes: Vec<(usize, f32)>,
    pub pans: Vec<(usize, f32)>,
    pub playing: bool,
    pub played_from: Vec<f64>,
    pub looping: bool,
    pub loop_region: Option<(f64, f64)>,
    pub toasts: Vec<String>,
    pub statuses: Vec<String>,
    pub aux_open: bool,
    pub aux_opened: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            tracks: (0..8).map(Track::new).collect(),
            current: 0,
            divisions: 4,
            saves: 0,
            undo_available: false,
            undos: 0,
            redos: 0,
            audio_inits: 0,
            previews: Vec::new(),
            volumes: Vec::new(),
            pans: Vec::new(),
            playing: false,
            played_from: Vec::new(),
            looping: false,
            loop_region: None,
            toasts: Vec::new(),
            statuses: Vec::new(),
            aux_open: false,
            aux_opened: 0,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.tracks[self.current].notes
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.tracks[self.current].notes = notes;
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(|s| s.as_str())
    }

    pub fn last_toast(&self) -> Option<&str> {
        self.toasts.last().map(|s| s.as_str())
    }
}

impl TrackStore for MockHost {
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

impl AudioPreview for MockHost {
    fn init(&mut self) {
        self.audio_inits += 1;
    }

    fn resume(&mut self) {}

    fn play_note(&mut self, pitch: u8, seconds: f32, track_id: usize, velocity: u8) {
        self.previews.push((pitch, seconds, track_id, velocity));
    }

    fn set_track_volume(&mut self, track_id: usize, volume: f32) {
        self.volumes.push((track_id, volume));
    }

    fn set_track_pan(&mut self, track_id: usize, pan: f32) {
        self.pans.push((track_id, pan));
    }
}

impl GridView for MockHost {
    fn grid_divisions(&self) -> u32 {
        self.divisions
    }

    fn set_grid_divisions(&mut self, divisions: u32) {
        self.divisions = divisions;
    }
}

impl History for MockHost {
    fn save_state(&mut self) {
        self.saves += 1;
    }

    fn undo(&mut self) -> bool {
        self.undos += 1;
        self.undo_available
    }

    fn redo(&mut self) -> bool {
        self.redos += 1;
        self.undo_available
    }
}

impl Transport for MockHost {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play_from(&mut self, beat: f64) {
        self.playing = true;
        self.played_from.push(beat);
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

impl Feedback for MockHost {
    fn show_toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }

    fn update_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn open_aux_list(&mut self) {
        self.aux_open = true;
        self.aux_opened += 1;
    }

    fn close_aux_list(&mut self) {
        self.aux_open = false;
    }

    fn aux_list_open(&self) -> bool {
        self.aux_open
    }
}

/// Controller plus mock host, advancing a synthetic clock one frame per tick.
pub struct Pad {
    pub controller: GamepadController,
    pub host: MockHost,
    pub now: u64,
}

impl Pad {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            controller: GamepadController::new(config, Box::new(MemoryStore::new())),
            host: MockHost::new(),
            now: 0,
        }
    }

    /// One tick with `pressed` held and sticks centered.
    pub fn frame(&mut self, pressed: &[usize]) -> TickOutcome {
        self.frame_axes(pressed, 0.0, 0.0)
    }

    pub fn frame_axes(&mut self, pressed: &[usize], x: f32, y: f32) -> TickOutcome {
        let snap = ControllerSnapshot::with_pressed(self.now, pressed);
        let snap = snap.with_axes(x, y);
        let outcome = self.controller.update(Some(&snap), &mut self.host);
        self.now += FRAME_MS;
        outcome
    }

    /// One tick with no controller attached.
    pub fn disconnected(&mut self) -> TickOutcome {
        let outcome = self.controller.update(None, &mut self.host);
        self.now += FRAME_MS;
        outcome
    }

    /// Press and release within two frames.
    pub fn tap(&mut self, button: usize) {
        self.frame(&[button]);
        self.frame(&[]);
    }

    /// Tick with `pressed` held until `ms` have passed since the first tick (inclusive).
    pub fn hold(&mut self, pressed: &[usize], ms: u64) {
        let end = self.now + ms;
        while self.now <= end {
            self.frame(pressed);
        }
    }

    /// Drag a Y selection from `from` to `to` and release it.
    pub fn select(&mut self, from: Position, to: Position) {
        self.controller.set_cursor(from);
        self.frame(&[Y]);
        self.controller.set_cursor(to);
        self.frame(&[Y]);
        self.frame(&[]);
    }

    pub fn cursor(&self) -> Position {
        self.controller.cursor()
    }
}
