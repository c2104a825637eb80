//! Note collection mutators driven by the controller.
//!
//! Every mutation of the track's notes is preceded by [`History::save_state`].
//! Continuous edits (length, velocity, move) take a `snapshot` flag so a held
//! button saves once on its first firing rather than on every repeat.

use crate::config::{ControllerConfig, PasteMode};
use crate::error::ControllerError;
use crate::host::{AudioPreview, Feedback, GridView, History, TrackStore};
use crate::state::grid::step_beats;
use crate::state::note::{clamp_pitch, clamp_velocity, find_note_at, note_name, round_time};
use crate::state::{Clipboard, ClipboardPitch, Note, Position, SelectionState, Track};

/// Result of a place/toggle at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toggle {
    Added(Note),
    Removed(Note),
}

#[derive(Debug, Clone)]
pub struct NoteEditor {
    last_duration: Option<f64>,
    last_velocity: u8,
    clipboard: Option<Clipboard>,
    clipboard_pitch: ClipboardPitch,
    paste_mode: PasteMode,
    copy_clears_selection: bool,
    velocity_step: u8,
    preview_seconds: f32,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new(&ControllerConfig::default())
    }
}

impl NoteEditor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            last_duration: None,
            last_velocity: clamp_velocity(config.default_velocity as i32),
            clipboard: None,
            clipboard_pitch: config.clipboard_pitch,
            paste_mode: config.paste_mode,
            copy_clears_selection: config.copy_clears_selection,
            velocity_step: config.velocity_step,
            preview_seconds: config.preview_seconds,
        }
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Duration given to new notes; `None` until a note is placed or resized.
    pub fn last_duration(&self) -> Option<f64> {
        self.last_duration
    }

    pub fn last_velocity(&self) -> u8 {
        self.last_velocity
    }

    /// Remove the note starting at `cursor`, or add one there.
    pub fn place_note<H>(
        &mut self,
        host: &mut H,
        cursor: Position,
    ) -> Result<Toggle, ControllerError>
    where
        H: TrackStore + GridView + History + AudioPreview,
    {
        let track_id = host.current_track_id();
        let step = step_beats(host.grid_divisions());
        if host.track(track_id).is_none() {
            return Err(ControllerError::TrackNotFound(track_id));
        }
        host.save_state();

        let track = current_track(host, track_id)?;
        let toggle = match find_note_at(&track.notes, cursor) {
            Some(index) => Toggle::Removed(track.notes.remove(index)),
            None => {
                let duration = *self.last_duration.get_or_insert(step);
                let note = Note::new(cursor.time, cursor.pitch, duration, self.last_velocity);
                track.notes.push(note);
                Toggle::Added(note)
            }
        };

        if let Toggle::Added(note) = toggle {
            host.play_note(note.pitch, self.preview_seconds, track_id, note.velocity);
        }
        let (verb, n) = match toggle {
            Toggle::Added(n) => ("Placed", n),
            Toggle::Removed(n) => ("Removed", n),
        };
        log::debug!("{} {} at beat {:.3}", verb, note_name(n.pitch), n.time);
        Ok(toggle)
    }

    /// Copy the active selection into the clipboard. Returns the number of notes copied.
    pub fn copy_selection<H>(
        &mut self,
        host: &mut H,
        selection: &mut SelectionState,
    ) -> Result<usize, ControllerError>
    where
        H: TrackStore + Feedback,
    {
        if !selection.is_active() || selection.members().is_empty() {
            return Ok(0);
        }
        let track_id = host.current_track_id();
        let track = find_track(host, track_id)?;
        let notes = selection.selected(&track.notes);
        let Some(clipboard) = Clipboard::from_notes(notes, self.clipboard_pitch) else {
            return Ok(0);
        };

        let count = clipboard.len();
        self.clipboard = Some(clipboard);
        if self.copy_clears_selection {
            selection.clear();
        }
        host.update_status(&format!("Copied {} notes", count));
        Ok(count)
    }

    /// Stamp the clipboard at `cursor`. Returns the number of notes added.
    pub fn paste<H>(&mut self, host: &mut H, cursor: Position) -> Result<usize, ControllerError>
    where
        H: TrackStore + History + Feedback,
    {
        let Some(clipboard) = self.clipboard.as_ref().filter(|c| !c.is_empty()) else {
            return Ok(0);
        };
        let track_id = host.current_track_id();
        let new_notes = clipboard.materialize(cursor);
        let count = new_notes.len();

        host.save_state();
        current_track(host, track_id)?.notes.extend(new_notes);
        if self.paste_mode == PasteMode::Consume {
            self.clipboard = None;
        }
        host.update_status(&format!("Pasted {} notes", count));
        Ok(count)
    }

    /// Returns true if there was a clipboard to clear.
    pub fn clear_clipboard<H: Feedback>(&mut self, host: &mut H) -> bool {
        if self.clipboard.take().is_some() {
            host.update_status("Clipboard cleared");
            true
        } else {
            false
        }
    }

    /// Remove exactly the selected notes, then clear the selection.
    pub fn delete_selected<H>(
        &mut self,
        host: &mut H,
        selection: &mut SelectionState,
    ) -> Result<usize, ControllerError>
    where
        H: TrackStore + History + Feedback,
    {
        if !selection.is_active() {
            return Ok(0);
        }
        let track_id = host.current_track_id();
        host.save_state();

        let track = current_track(host, track_id)?;
        let before = track.notes.len();
        let mut index = 0;
        track.notes.retain(|_| {
            let keep = !selection.contains(index);
            index += 1;
            keep
        });
        let removed = before - track.notes.len();

        selection.clear();
        host.update_status(&format!("Deleted {} notes", removed));
        Ok(removed)
    }

    /// Lengthen (`direction > 0`) or shorten each target by one grid step,
    /// never below one step.
    pub fn change_length<H>(
        &mut self,
        host: &mut H,
        targets: &[usize],
        direction: i8,
        snapshot: bool,
    ) -> Result<usize, ControllerError>
    where
        H: TrackStore + GridView + History,
    {
        let track_id = host.current_track_id();
        if direction == 0 || !has_targets(host, track_id, targets)? {
            return Ok(0);
        }
        let step = step_beats(host.grid_divisions());
        if snapshot {
            host.save_state();
        }

        let track = current_track(host, track_id)?;
        let mut changed = 0;
        for &i in targets {
            if let Some(note) = track.notes.get_mut(i) {
                let resized = round_time(note.duration + step * direction as f64);
                note.duration = resized.max(step);
                self.last_duration = Some(note.duration);
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Raise or lower each target's velocity by the configured step, clamped to 1-127.
    pub fn change_velocity<H>(
        &mut self,
        host: &mut H,
        targets: &[usize],
        direction: i8,
        snapshot: bool,
    ) -> Result<usize, ControllerError>
    where
        H: TrackStore + History + Feedback,
    {
        let track_id = host.current_track_id();
        if direction == 0 || !has_targets(host, track_id, targets)? {
            return Ok(0);
        }
        if snapshot {
            host.save_state();
        }

        let delta = self.velocity_step as i32 * direction as i32;
        let track = current_track(host, track_id)?;
        let mut changed = 0;
        for &i in targets {
            if let Some(note) = track.notes.get_mut(i) {
                note.velocity = clamp_velocity(note.velocity as i32 + delta);
                self.last_velocity = note.velocity;
                changed += 1;
            }
        }
        if changed > 0 {
            host.update_status(&format!("Velocity: {}", self.last_velocity));
        }
        Ok(changed)
    }

    /// Shift every selected note by `dx` grid steps and `dy` semitones; the
    /// cursor follows so it stays with the selection.
    pub fn move_selected<H>(
        &mut self,
        host: &mut H,
        selection: &SelectionState,
        cursor: &mut Position,
        dx: i8,
        dy: i8,
        snapshot: bool,
    ) -> Result<usize, ControllerError>
    where
        H: TrackStore + GridView + History,
    {
        if !selection.is_active() || (dx == 0 && dy == 0) {
            return Ok(0);
        }
        let track_id = host.current_track_id();
        let dt = step_beats(host.grid_divisions()) * dx as f64;
        if snapshot {
            host.save_state();
        }

        let track = current_track(host, track_id)?;
        let mut moved = 0;
        for &i in selection.members() {
            if let Some(note) = track.notes.get_mut(i) {
                note.time = round_time((note.time + dt).max(0.0));
                note.pitch = clamp_pitch(note.pitch as i32 + dy as i32);
                moved += 1;
            }
        }
        let next = cursor.offset(dt, dy as i32);
        *cursor = Position::new(round_time(next.time), next.pitch);
        Ok(moved)
    }
}

/// True when at least one target indexes a note on the track.
fn has_targets<H: TrackStore>(
    host: &H,
    track_id: usize,
    targets: &[usize],
) -> Result<bool, ControllerError> {
    let track = find_track(host, track_id)?;
    Ok(targets.iter().any(|&i| i < track.notes.len()))
}

fn find_track<H: TrackStore>(host: &H, track_id: usize) -> Result<&Track, ControllerError> {
    let missing = ControllerError::TrackNotFound(track_id);
    host.track(track_id).ok_or(missing)
}

fn current_track<H: TrackStore>(
    host: &mut H,
    track_id: usize,
) -> Result<&mut Track, ControllerError> {
    let missing = ControllerError::TrackNotFound(track_id);
    host.track_mut(track_id).ok_or(missing)
}
