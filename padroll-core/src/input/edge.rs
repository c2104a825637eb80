use super::snapshot::{axis_direction, ControllerSnapshot};

/// Detects press/release transitions between consecutive snapshots.
///
/// The previous-frame buffers must be committed exactly once per tick, after
/// every consumer for that tick has read them.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous_buttons: Vec<bool>,
    previous_axes: Vec<f32>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_pressed(&self, index: usize) -> bool {
        self.previous_buttons.get(index).copied().unwrap_or(false)
    }

    pub fn just_pressed(&self, snap: &ControllerSnapshot, index: usize) -> bool {
        snap.pressed(index) && !self.was_pressed(index)
    }

    pub fn just_released(&self, snap: &ControllerSnapshot, index: usize) -> bool {
        !snap.pressed(index) && self.was_pressed(index)
    }

    /// Lowest physical index that went down this tick.
    pub fn first_just_pressed(&self, snap: &ControllerSnapshot) -> Option<usize> {
        (0..snap.buttons.len()).find(|&i| self.just_pressed(snap, i))
    }

    /// Direction an axis newly crossed `threshold` into, or 0 when unchanged.
    pub fn axis_edge(&self, snap: &ControllerSnapshot, axis: usize, threshold: f32) -> i8 {
        let now = axis_direction(snap.axis(axis), threshold);
        let previous = self.previous_axes.get(axis).copied().unwrap_or(0.0);
        let before = axis_direction(previous, threshold);
        if now != 0 && now != before { now } else { 0 }
    }

    /// Store this tick's state as the previous state for the next tick.
    pub fn commit(&mut self, snap: &ControllerSnapshot) {
        self.previous_buttons.clear();
        self.previous_buttons.extend_from_slice(&snap.buttons);
        self.previous_axes.clear();
        self.previous_axes.extend_from_slice(&snap.axes);
    }
}
