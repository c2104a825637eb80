//! Per-tick modal dispatch from raw controller snapshots to editor actions.

mod buttons;
mod frame;
mod mode;
mod movement;

pub use frame::Frame;
pub use mode::{resolve, Mode};

use crate::config::ControllerConfig;
use crate::edit::NoteEditor;
use crate::error::{ControllerError, StoreError};
use crate::host::EditorHost;
use crate::input::{
    ButtonBinding, ControllerSnapshot, DeviceBinding, EdgeDetector, LogicalButton,
    LongPressTracker, RemapCallback, RepeatScheduler,
};
use crate::persistence::BindingStore;
use crate::state::{Clipboard, Position, SelectionState};

pub const STATUS_CONNECTED: &str = "Connected";
pub const STATUS_SEARCHING: &str = "Searching for controller...";

/// What one call to [`GamepadController::update`] did.
#[derive(Debug)]
pub struct TickOutcome {
    pub mode: Mode,
    /// A handler failure caught at the tick boundary.
    pub error: Option<ControllerError>,
}

/// The modal input controller.
///
/// Call [`update`](Self::update) once per frame with that frame's snapshot.
/// All timing comes from the snapshot's timestamp.
pub struct GamepadController {
    config: ControllerConfig,
    device: DeviceBinding,
    edges: EdgeDetector,
    repeat: RepeatScheduler,
    editor: NoteEditor,
    selection: SelectionState,
    cursor: Position,
    start_press: LongPressTracker,
    secondary_press: LongPressTracker,
    last_track: Option<usize>,
    connected: Option<bool>,
    /// Set when a live controller drops out; cleared by the next snapshot.
    resync: bool,
    status: &'static str,
    mode: Mode,
}

impl GamepadController {
    pub fn new(config: ControllerConfig, store: Box<dyn BindingStore>) -> Self {
        Self {
            device: DeviceBinding::load(store),
            edges: EdgeDetector::new(),
            repeat: RepeatScheduler::new(),
            editor: NoteEditor::new(&config),
            selection: SelectionState::new(),
            cursor: Position::default(),
            start_press: LongPressTracker::new(),
            secondary_press: LongPressTracker::new(),
            last_track: None,
            connected: None,
            resync: false,
            status: STATUS_SEARCHING,
            mode: Mode::Disconnected,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.editor.clipboard()
    }

    pub fn has_clipboard(&self) -> bool {
        self.editor.has_clipboard()
    }

    /// Connection status text ("Connected" or "Searching for controller...").
    pub fn status(&self) -> &str {
        self.status
    }

    /// Mode the last tick resolved to.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn binding(&self) -> &ButtonBinding {
        self.device.binding()
    }

    pub fn is_capturing(&self) -> bool {
        self.device.is_capturing()
    }

    /// Bind the next pressed button to `action`.
    pub fn begin_remap(&mut self, action: LogicalButton, callback: Option<RemapCallback>) {
        self.device.begin_capture(action, callback);
    }

    pub fn cancel_remap(&mut self) {
        self.device.cancel_capture();
    }

    pub fn reset_bindings(&mut self) -> Result<(), StoreError> {
        self.device.reset()
    }

    /// Drop the selection and any open drag, e.g. after the host replaced the note list.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.repeat.cancel(movement::MOVE_SELECTION);
    }

    /// Run one tick. `None` means no controller is attached.
    ///
    /// Handler errors are caught here and returned in the outcome; the edge
    /// detector's previous state is committed either way. The first snapshot
    /// after a live controller drops out and returns only becomes the new edge
    /// baseline.
    pub fn update<H: EditorHost>(
        &mut self,
        snapshot: Option<&ControllerSnapshot>,
        host: &mut H,
    ) -> TickOutcome {
        let Some(snap) = snapshot else {
            self.disconnect(host);
            return TickOutcome {
                mode: Mode::Disconnected,
                error: None,
            };
        };
        if self.connected != Some(true) {
            self.connect(host);
        }
        if std::mem::take(&mut self.resync) {
            // Buttons held across the gap must not read as presses or releases.
            self.edges.commit(snap);
            return TickOutcome {
                mode: self.mode,
                error: None,
            };
        }

        let frame = Frame::read(snap, &self.edges, self.device.binding(), &self.config);
        let result = self.dispatch(&frame, host);
        self.edges.commit(snap);
        self.repeat.sweep();

        let error = match result {
            Ok(_) => None,
            Err(e) => {
                log::error!("Input handler failed: {}", e);
                Some(e)
            }
        };
        TickOutcome {
            mode: self.mode,
            error,
        }
    }

    fn connect<H: EditorHost>(&mut self, host: &mut H) {
        log::info!("Controller connected");
        self.connected = Some(true);
        self.status = STATUS_CONNECTED;
        host.update_status(STATUS_CONNECTED);
    }

    fn disconnect<H: EditorHost>(&mut self, host: &mut H) {
        self.mode = Mode::Disconnected;
        if self.connected == Some(false) {
            return;
        }
        if self.connected == Some(true) {
            log::info!("Controller disconnected");
            self.resync = true;
        }
        self.connected = Some(false);
        self.status = STATUS_SEARCHING;
        self.repeat.clear();
        self.start_press.reset();
        self.secondary_press.reset();
        host.update_status(STATUS_SEARCHING);
    }

    fn dispatch<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<Mode, ControllerError> {
        let capturing = self.device.is_capturing();
        if !capturing {
            self.sync_track(host);
            self.history_buttons(frame, host);
            self.start_release(frame, host)?;

            if self.selection.is_dragging() && !frame.held(LogicalButton::Y) {
                self.selection.finalize();
                let count = self.selection.members().len();
                log::debug!("Selection finalized with {} notes", count);
            }
        }

        let mode = resolve(frame, capturing, self.selection.is_active());
        self.mode = mode;
        match mode {
            Mode::RemapCapture => self.capture(frame, host)?,
            Mode::TrackShortcut => self.track_shortcuts(frame, host)?,
            Mode::GridShortcut => self.grid_shortcuts(frame, host),
            Mode::SelectionDrag => self.selection_drag(frame, host)?,
            Mode::NoteEdit => self.note_edit(frame, host)?,
            Mode::MoveSelection => self.move_selection(frame, host)?,
            Mode::Cursor => {
                let fast = frame.held(LogicalButton::L2);
                let divisions = host.grid_divisions();
                self.cursor_movement(frame.now_ms, divisions, fast, frame.dx, frame.dy);
            }
            Mode::Disconnected => {}
        }

        if mode.suppresses_actions() {
            self.secondary_press.reset();
        } else {
            self.action_buttons(frame, host)?;
        }
        Ok(mode)
    }

    /// Bind the first button pressed this tick to the pending action.
    fn capture<H: EditorHost>(&mut self, frame: &Frame, host: &mut H) -> Result<(), StoreError> {
        let Some(index) = frame.first_pressed else {
            return Ok(());
        };
        if let Some(action) = self.device.complete_capture(index)? {
            host.update_status(&format!("Mapped {} to button {}", action, index));
        }
        Ok(())
    }

    /// Clear the selection when the host switched tracks or the note list shrank under it.
    fn sync_track<H: EditorHost>(&mut self, host: &mut H) {
        let id = host.current_track_id();
        if self.last_track.is_some_and(|last| last != id) {
            log::debug!("Track changed to {}; selection cleared", id);
            self.clear_selection();
        }
        self.last_track = Some(id);

        let len = host.track(id).map_or(0, |t| t.notes.len());
        self.selection.retain_valid(len);
    }

    fn history_buttons<H: EditorHost>(&mut self, frame: &Frame, host: &mut H) {
        if frame.pressed(LogicalButton::L1) {
            if !host.undo() {
                host.show_toast("Nothing to undo");
            }
            self.clear_selection();
        }
        if frame.pressed(LogicalButton::R1) {
            if !host.redo() {
                host.show_toast("Nothing to redo");
            }
            self.clear_selection();
        }
    }
}
