use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::persistence::BindingStore;

/// Store key for the persisted binding table.
pub const BINDINGS_KEY: &str = "gamepad_bindings";

/// Named controller inputs, independent of physical button index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl LogicalButton {
    pub const ALL: [LogicalButton; 14] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::L1,
        Self::R1,
        Self::L2,
        Self::R2,
        Self::Select,
        Self::Start,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
            Self::L1 => "L1",
            Self::R1 => "R1",
            Self::L2 => "L2",
            Self::R2 => "R2",
            Self::Select => "SELECT",
            Self::Start => "START",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Standard gamepad layout index.
    pub fn default_index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::X => 2,
            Self::Y => 3,
            Self::L1 => 4,
            Self::R1 => 5,
            Self::L2 => 6,
            Self::R2 => 7,
            Self::Select => 8,
            Self::Start => 9,
            Self::Up => 12,
            Self::Down => 13,
            Self::Left => 14,
            Self::Right => 15,
        }
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical button → physical index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBinding {
    map: BTreeMap<LogicalButton, usize>,
}

impl Default for ButtonBinding {
    fn default() -> Self {
        Self {
            map: LogicalButton::ALL
                .iter()
                .map(|&b| (b, b.default_index()))
                .collect(),
        }
    }
}

impl ButtonBinding {
    pub fn index(&self, button: LogicalButton) -> usize {
        self.map
            .get(&button)
            .copied()
            .unwrap_or_else(|| button.default_index())
    }

    pub fn set(&mut self, button: LogicalButton, index: usize) {
        self.map.insert(button, index);
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalButton, usize)> + '_ {
        self.map.iter().map(|(&b, &i)| (b, i))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let table: BTreeMap<&str, usize> =
            self.map.iter().map(|(b, &i)| (b.name(), i)).collect();
        serde_json::to_string(&table)
    }

    /// Parse a persisted table. Unknown names and non-index values are skipped;
    /// anything not mentioned keeps its default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut binding = Self::default();
        for (name, value) in raw {
            match (LogicalButton::from_name(&name), value.as_u64()) {
                (Some(button), Some(index)) => binding.set(button, index as usize),
                _ => log::warn!("Ignoring binding entry {}={}", name, value),
            }
        }
        Ok(binding)
    }
}

/// Called once when a capture completes with the bound action and physical index.
pub type RemapCallback = Box<dyn FnOnce(LogicalButton, usize)>;

enum RemapState {
    Idle,
    Capturing {
        action: LogicalButton,
        callback: Option<RemapCallback>,
    },
}

/// Persisted button binding plus the "press a button to bind" capture flow.
pub struct DeviceBinding {
    binding: ButtonBinding,
    store: Box<dyn BindingStore>,
    state: RemapState,
}

impl fmt::Debug for DeviceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceBinding")
            .field("binding", &self.binding)
            .field("capturing", &self.capturing())
            .finish()
    }
}

impl DeviceBinding {
    /// Load the table from `store`. Missing or malformed data falls back to defaults.
    pub fn load(store: Box<dyn BindingStore>) -> Self {
        let binding = match store.get(BINDINGS_KEY) {
            Ok(Some(json)) => ButtonBinding::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Malformed button bindings, using defaults: {}", e);
                ButtonBinding::default()
            }),
            Ok(None) => ButtonBinding::default(),
            Err(e) => {
                log::warn!("Could not read button bindings, using defaults: {}", e);
                ButtonBinding::default()
            }
        };
        Self {
            binding,
            store,
            state: RemapState::Idle,
        }
    }

    pub fn binding(&self) -> &ButtonBinding {
        &self.binding
    }

    pub fn index(&self, button: LogicalButton) -> usize {
        self.binding.index(button)
    }

    /// Logical action waiting for a press, if capturing.
    pub fn capturing(&self) -> Option<LogicalButton> {
        match self.state {
            RemapState::Capturing { action, .. } => Some(action),
            RemapState::Idle => None,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing().is_some()
    }

    /// Arm capture for `action`. Replaces any capture already in progress.
    pub fn begin_capture(
        &mut self,
        action: LogicalButton,
        on_complete: Option<RemapCallback>,
    ) {
        log::info!("Waiting for a button to bind to {}", action);
        self.state = RemapState::Capturing {
            action,
            callback: on_complete,
        };
    }

    pub fn cancel_capture(&mut self) {
        self.state = RemapState::Idle;
    }

    /// Bind the pending action to `index`, persist, fire the callback and go idle.
    ///
    /// The in-memory binding is updated even if persisting fails; the callback
    /// only fires once the table is stored.
    pub fn complete_capture(
        &mut self,
        index: usize,
    ) -> Result<Option<LogicalButton>, StoreError> {
        let RemapState::Capturing { action, callback } =
            std::mem::replace(&mut self.state, RemapState::Idle)
        else {
            return Ok(None);
        };
        self.binding.set(action, index);
        log::info!("Bound {} to button {}", action, index);
        self.persist()?;
        if let Some(callback) = callback {
            callback(action, index);
        }
        Ok(Some(action))
    }

    /// Restore the built-in table and persist it.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.binding = ButtonBinding::default();
        self.state = RemapState::Idle;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = self.binding.to_json()?;
        self.store.set(BINDINGS_KEY, &json)
    }
}
