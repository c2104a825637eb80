//! Recorded controller input, replayed one frame per tick.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use padroll_core::state::grid::DEFAULT_DIVISIONS;
use padroll_core::{ControllerSnapshot, GamepadController};

use crate::session::Session;

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptFrame {
    /// Milliseconds since the start of the recording.
    pub t: u64,
    /// Physical indices held this frame.
    #[serde(default)]
    pub buttons: Vec<usize>,
    #[serde(default)]
    pub axes: Vec<f32>,
}

impl ScriptFrame {
    pub fn to_snapshot(&self) -> ControllerSnapshot {
        let mut snap = ControllerSnapshot::with_pressed(self.t, &self.buttons);
        if !self.axes.is_empty() {
            snap.axes = self.axes.clone();
        }
        snap
    }
}

fn default_divisions() -> u32 {
    DEFAULT_DIVISIONS
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    /// `null` entries are frames with no controller attached.
    pub frames: Vec<Option<ScriptFrame>>,
    #[serde(default = "default_divisions")]
    pub grid_divisions: u32,
}

impl ReplayScript {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let shown = path.display();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading replay script {}", shown))?;
        Self::parse(&contents)
            .with_context(|| format!("parsing replay script {}", shown))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Feed every frame through the controller. Returns the number of frames whose
/// handlers failed; those failures are logged, not fatal.
pub fn replay(
    script: &ReplayScript,
    controller: &mut GamepadController,
    session: &mut Session,
) -> usize {
    session.grid_divisions = script.grid_divisions;
    let mut failures = 0;
    for (i, frame) in script.frames.iter().enumerate() {
        let snap = frame.as_ref().map(ScriptFrame::to_snapshot);
        let outcome = controller.update(snap.as_ref(), session);
        if let Some(e) = outcome.error {
            log::warn!("Frame {}: {}", i, e);
            failures += 1;
        }
    }
    failures
}
