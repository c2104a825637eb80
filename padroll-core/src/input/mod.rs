//! Raw controller input: snapshots, edges, auto-repeat and bindings.

pub mod binding;
pub mod edge;
pub mod long_press;
pub mod repeat;
pub mod snapshot;

pub use binding::{ButtonBinding, DeviceBinding, LogicalButton, RemapCallback};
pub use edge::EdgeDetector;
pub use long_press::LongPressTracker;
pub use repeat::{Fire, RepeatRate, RepeatScheduler};
pub use snapshot::{axis_direction, ControllerSnapshot};
