use super::frame::Frame;
use crate::input::LogicalButton;

/// The single interaction mode a tick resolves to, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No snapshot this tick.
    Disconnected,
    /// Waiting for a press to bind to a logical action.
    RemapCapture,
    /// START held: mixer shortcuts on the current track.
    TrackShortcut,
    /// R2 held: grid resolution on left/right.
    GridShortcut,
    /// Y held: rectangular drag selection.
    SelectionDrag,
    /// A held with a direction: note length (horizontal) and velocity (vertical).
    NoteEdit,
    /// Active selection with a direction: move the selected notes.
    MoveSelection,
    /// Plain cursor movement.
    Cursor,
}

impl Mode {
    /// Modes that take over the action buttons for the tick.
    pub fn suppresses_actions(self) -> bool {
        matches!(
            self,
            Mode::Disconnected | Mode::RemapCapture | Mode::TrackShortcut | Mode::GridShortcut
        )
    }
}

/// Pick the mode for this tick.
pub fn resolve(frame: &Frame, capturing: bool, selection_active: bool) -> Mode {
    if capturing {
        Mode::RemapCapture
    } else if frame.held(LogicalButton::Start) {
        Mode::TrackShortcut
    } else if frame.held(LogicalButton::R2) {
        Mode::GridShortcut
    } else if frame.held(LogicalButton::Y) {
        Mode::SelectionDrag
    } else if frame.held(LogicalButton::A) && frame.moving() {
        Mode::NoteEdit
    } else if selection_active && frame.moving() {
        Mode::MoveSelection
    } else {
        Mode::Cursor
    }
}
