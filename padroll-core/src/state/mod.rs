pub mod clipboard;
pub mod grid;
pub mod note;
pub mod selection;
pub mod track;

pub use clipboard::{ClipPitch, Clipboard, ClipboardNote, ClipboardPitch};
pub use note::{note_name, Note, Position};
pub use selection::SelectionState;
pub use track::Track;
