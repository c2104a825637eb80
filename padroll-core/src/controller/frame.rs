use crate::config::ControllerConfig;
use crate::input::snapshot::{AXIS_LEFT_X, AXIS_LEFT_Y};
use crate::input::{axis_direction, ButtonBinding, ControllerSnapshot, EdgeDetector, LogicalButton};

const BUTTONS: usize = LogicalButton::ALL.len();

/// Everything a tick needs from the device, read once from a single snapshot.
///
/// Handlers consult only this; nothing re-reads the live snapshot mid-tick.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub now_ms: u64,
    held: [bool; BUTTONS],
    pressed: [bool; BUTTONS],
    released: [bool; BUTTONS],
    /// -1 left, 1 right (d-pad or stick past the deadzone; stick wins).
    pub dx: i8,
    /// 1 up (higher pitch), -1 down.
    pub dy: i8,
    /// Stick crossings of the high threshold, same sign convention as dx/dy.
    pub stick_x_edge: i8,
    pub stick_y_edge: i8,
    /// Lowest physical index that went down this tick, bound or not.
    pub first_pressed: Option<usize>,
}

impl Frame {
    pub fn read(
        snap: &ControllerSnapshot,
        edges: &EdgeDetector,
        binding: &ButtonBinding,
        config: &ControllerConfig,
    ) -> Self {
        let mut frame = Frame {
            now_ms: snap.timestamp_ms,
            ..Default::default()
        };
        for button in LogicalButton::ALL {
            let index = binding.index(button);
            frame.held[button as usize] = snap.pressed(index);
            frame.pressed[button as usize] = edges.just_pressed(snap, index);
            frame.released[button as usize] = edges.just_released(snap, index);
        }

        if frame.held(LogicalButton::Left) {
            frame.dx = -1;
        }
        if frame.held(LogicalButton::Right) {
            frame.dx = 1;
        }
        if frame.held(LogicalButton::Up) {
            frame.dy = 1;
        }
        if frame.held(LogicalButton::Down) {
            frame.dy = -1;
        }

        // Stick Y is positive downward.
        let sx = axis_direction(snap.axis(AXIS_LEFT_X), config.stick_deadzone);
        let sy = axis_direction(snap.axis(AXIS_LEFT_Y), config.stick_deadzone);
        if sx != 0 {
            frame.dx = sx;
        }
        if sy != 0 {
            frame.dy = -sy;
        }

        let threshold = config.grid_stick_threshold;
        frame.stick_x_edge = edges.axis_edge(snap, AXIS_LEFT_X, threshold);
        frame.stick_y_edge = -edges.axis_edge(snap, AXIS_LEFT_Y, threshold);
        frame.first_pressed = edges.first_just_pressed(snap);
        frame
    }

    pub fn held(&self, button: LogicalButton) -> bool {
        self.held[button as usize]
    }

    pub fn pressed(&self, button: LogicalButton) -> bool {
        self.pressed[button as usize]
    }

    pub fn released(&self, button: LogicalButton) -> bool {
        self.released[button as usize]
    }

    pub fn moving(&self) -> bool {
        self.dx != 0 || self.dy != 0
    }
}
