//! Modal gamepad input for a piano-roll note editor.
//!
//! [`GamepadController`] turns one raw [`ControllerSnapshot`] per frame into
//! cursor movement, selection, clipboard and note edits against a host that
//! implements the [`host`] traits.

pub mod config;
pub mod controller;
pub mod edit;
pub mod error;
pub mod host;
pub mod input;
pub mod persistence;
pub mod state;

pub use config::{ControllerConfig, PasteMode};
pub use controller::{GamepadController, Mode, TickOutcome, STATUS_CONNECTED, STATUS_SEARCHING};
pub use edit::{NoteEditor, Toggle};
pub use error::{ControllerError, StoreError};
pub use host::{AudioPreview, EditorHost, Feedback, GridView, History, TrackStore, Transport};
pub use input::{ButtonBinding, ControllerSnapshot, LogicalButton, RemapCallback};
pub use persistence::{BindingStore, MemoryStore, SqliteStore};
pub use state::{note_name, Note, Position, SelectionState, Track};
