/// Tap-vs-hold bookkeeping for one combo button.
///
/// `handled` is set once the hold produced an action (a combo or the
/// long-press action itself) so the release does not also fire the tap.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongPressTracker {
    down_ms: Option<u64>,
    handled: bool,
}

impl LongPressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, now_ms: u64) {
        self.down_ms = Some(now_ms);
        self.handled = false;
    }

    /// End the hold. Returns how long it lasted and whether it was handled.
    pub fn release(&mut self, now_ms: u64) -> Option<(u64, bool)> {
        let down = self.down_ms.take()?;
        let handled = std::mem::take(&mut self.handled);
        Some((now_ms.saturating_sub(down), handled))
    }

    pub fn is_down(&self) -> bool {
        self.down_ms.is_some()
    }

    pub fn held_for(&self, now_ms: u64) -> Option<u64> {
        self.down_ms.map(|down| now_ms.saturating_sub(down))
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    pub fn mark_handled(&mut self) {
        if self.down_ms.is_some() {
            self.handled = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
