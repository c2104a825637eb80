use super::{Frame, GamepadController};
use crate::error::ControllerError;
use crate::host::{EditorHost, TrackStore};
use crate::input::{Fire, LogicalButton};
use crate::state::grid::{coarser, finer, step_beats, BEATS_PER_BAR};
use crate::state::note::{find_note_at, round_time};
use crate::state::Position;

pub(super) const MOVE_SELECTION: &str = "move_selection";
const NOTE_LENGTH: &str = "note_length";
const NOTE_VELOCITY: &str = "note_velocity";

const SEMITONE: i32 = 1;
const OCTAVE: i32 = 12;

impl GamepadController {
    /// Repeat-gated cursor movement. Each axis and unit has its own timer, so
    /// toggling the fast modifier restarts the cadence.
    pub(super) fn cursor_movement(
        &mut self,
        now_ms: u64,
        divisions: u32,
        fast: bool,
        dx: i8,
        dy: i8,
    ) {
        let (key_x, step_x) = if fast {
            ("move_x_measure", BEATS_PER_BAR)
        } else {
            ("move_x_grid", step_beats(divisions))
        };
        let (key_y, step_y) = if fast {
            ("move_y_octave", OCTAVE)
        } else {
            ("move_y_semitone", SEMITONE)
        };
        let rate = self.config.cursor_repeat;

        if self.repeat.poll(key_x, dx, now_ms, rate).is_some() {
            let next = self.cursor.offset(step_x * dx as f64, 0);
            self.cursor = Position::new(round_time(next.time), next.pitch);
        }
        if self.repeat.poll(key_y, dy, now_ms, rate).is_some() {
            self.cursor = self.cursor.offset(0.0, step_y * dy as i32);
        }
    }

    /// R2 held: left/right edges change grid resolution. Only vertical movement passes through.
    pub(super) fn grid_shortcuts<H: EditorHost>(&mut self, frame: &Frame, host: &mut H) {
        let divisions = host.grid_divisions();
        let next = if frame.pressed(LogicalButton::Left) || frame.stick_x_edge < 0 {
            finer(divisions)
        } else if frame.pressed(LogicalButton::Right) || frame.stick_x_edge > 0 {
            coarser(divisions)
        } else {
            divisions
        };
        if next != divisions {
            host.set_grid_divisions(next);
            host.update_status(&format!("Grid: 1/{}", next));
        }
        let fast = frame.held(LogicalButton::L2);
        self.cursor_movement(frame.now_ms, next, fast, 0, frame.dy);
    }

    pub(super) fn selection_drag<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        if frame.pressed(LogicalButton::Y) {
            if self.selection.is_active() {
                self.clear_selection();
            } else {
                self.selection.begin(self.cursor);
            }
        }
        let divisions = host.grid_divisions();
        self.cursor_movement(frame.now_ms, divisions, false, frame.dx, frame.dy);
        self.refresh_drag(host)
    }

    /// Recompute drag membership from the current cursor. No-op outside a drag.
    pub(super) fn refresh_drag<H: TrackStore>(&mut self, host: &H) -> Result<(), ControllerError> {
        if !self.selection.is_dragging() {
            return Ok(());
        }
        let id = host.current_track_id();
        let track = host.track(id).ok_or(ControllerError::TrackNotFound(id))?;
        self.selection.update(self.cursor, &track.notes);
        Ok(())
    }

    /// A held with a direction: horizontal edits length, vertical edits velocity.
    pub(super) fn note_edit<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        let targets = self.edit_targets(host)?;
        let now = frame.now_ms;

        let rate = self.config.length_repeat;
        if let Some(fire) = self.repeat.poll(NOTE_LENGTH, frame.dx, now, rate) {
            let snapshot = fire == Fire::Initial;
            self.editor
                .change_length(host, &targets, frame.dx, snapshot)?;
        }
        let rate = self.config.velocity_repeat;
        if let Some(fire) = self.repeat.poll(NOTE_VELOCITY, frame.dy, now, rate) {
            let snapshot = fire == Fire::Initial;
            self.editor
                .change_velocity(host, &targets, frame.dy, snapshot)?;
        }
        Ok(())
    }

    /// Selected notes when a selection is active, otherwise the note under the cursor.
    fn edit_targets<H: TrackStore>(&self, host: &H) -> Result<Vec<usize>, ControllerError> {
        if self.selection.is_active() {
            return Ok(self.selection.members().to_vec());
        }
        let id = host.current_track_id();
        let track = host.track(id).ok_or(ControllerError::TrackNotFound(id))?;
        let under_cursor = find_note_at(&track.notes, self.cursor);
        Ok(under_cursor.into_iter().collect())
    }

    pub(super) fn move_selection<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        // One timer for both axes; any change of the (dx, dy) pair restarts it.
        let direction = frame.dx * 3 + frame.dy;
        let (now, rate) = (frame.now_ms, self.config.selection_repeat);
        if let Some(fire) = self.repeat.poll(MOVE_SELECTION, direction, now, rate) {
            self.editor.move_selected(
                host,
                &self.selection,
                &mut self.cursor,
                frame.dx,
                frame.dy,
                fire == Fire::Initial,
            )?;
        }
        Ok(())
    }
}
