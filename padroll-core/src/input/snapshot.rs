use serde::{Deserialize, Serialize};

/// Buttons in the standard gamepad layout (face, shoulders, sticks, d-pad, home).
pub const STANDARD_BUTTON_COUNT: usize = 17;

pub const AXIS_LEFT_X: usize = 0;
pub const AXIS_LEFT_Y: usize = 1;

/// Raw controller state sampled once per frame by the host.
///
/// Axes follow the standard mapping: positive X is right, positive Y is down.
/// `timestamp_ms` is a monotonic clock reading taken when the frame was sampled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f32>,
    pub timestamp_ms: u64,
}

impl ControllerSnapshot {
    /// A neutral snapshot: standard button count, two centered axes.
    pub fn idle(timestamp_ms: u64) -> Self {
        Self {
            buttons: vec![false; STANDARD_BUTTON_COUNT],
            axes: vec![0.0; 2],
            timestamp_ms,
        }
    }

    /// A neutral snapshot with the given physical buttons held.
    pub fn with_pressed(timestamp_ms: u64, pressed: &[usize]) -> Self {
        let mut snap = Self::idle(timestamp_ms);
        for &i in pressed {
            if i >= snap.buttons.len() {
                snap.buttons.resize(i + 1, false);
            }
            snap.buttons[i] = true;
        }
        snap
    }

    pub fn with_axes(mut self, x: f32, y: f32) -> Self {
        if self.axes.len() < 2 {
            self.axes.resize(2, 0.0);
        }
        self.axes[AXIS_LEFT_X] = x;
        self.axes[AXIS_LEFT_Y] = y;
        self
    }

    /// Out-of-range indices read as released.
    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Out-of-range axes read as centered.
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

/// -1, 0 or 1 for an axis value filtered through `deadzone`.
pub fn axis_direction(value: f32, deadzone: f32) -> i8 {
    if value.abs() > deadzone {
        if value > 0.0 { 1 } else { -1 }
    } else {
        0
    }
}
