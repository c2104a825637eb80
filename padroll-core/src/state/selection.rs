use super::note::{Note, Position, TIME_EPSILON};

/// Rectangular range selection over the current track's notes.
///
/// Members are indices into the track's note list. They stay valid while the
/// controller is the only thing mutating the list; any wholesale replacement
/// (track switch, undo/redo) must call [`SelectionState::clear`].
///
/// While a drag is open (`anchor` is set) `members` holds the live rectangle
/// contents and `active` is false. Outside a drag, `active == false` implies
/// `members` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    anchor: Option<Position>,
    members: Vec<usize>,
    active: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Open a drag anchored at `at`, dropping any previous membership.
    pub fn begin(&mut self, at: Position) {
        self.anchor = Some(at);
        self.members.clear();
        self.active = false;
    }

    /// Recompute membership as exactly the notes inside the anchor/cursor rectangle.
    pub fn update(&mut self, cursor: Position, notes: &[Note]) {
        let Some(anchor) = self.anchor else { return };
        let (lo, hi) = bounds(anchor, cursor);
        self.members = notes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                n.time >= lo.time - TIME_EPSILON
                    && n.time <= hi.time + TIME_EPSILON
                    && n.pitch >= lo.pitch
                    && n.pitch <= hi.pitch
            })
            .map(|(i, _)| i)
            .collect();
    }

    /// Close the drag. The selection becomes active only if it captured a note.
    pub fn finalize(&mut self) {
        self.anchor = None;
        self.active = !self.members.is_empty();
        if !self.active {
            self.members.clear();
        }
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.members.clear();
        self.active = false;
    }

    /// Drop the selection if any member no longer indexes into a list of `len` notes.
    pub fn retain_valid(&mut self, len: usize) -> bool {
        if self.members.iter().any(|&i| i >= len) {
            log::warn!("Selection referenced missing notes; cleared");
            self.clear();
            return false;
        }
        true
    }

    /// Rectangle currently being dragged, as (min corner, max corner), for drawing.
    pub fn drag_rect(&self, cursor: Position) -> Option<(Position, Position)> {
        self.anchor.map(|a| bounds(a, cursor))
    }

    /// Selected notes in list order.
    pub fn selected<'a>(&'a self, notes: &'a [Note]) -> impl Iterator<Item = &'a Note> + 'a {
        self.members.iter().filter_map(move |&i| notes.get(i))
    }
}

fn bounds(a: Position, b: Position) -> (Position, Position) {
    (
        Position {
            time: a.time.min(b.time),
            pitch: a.pitch.min(b.pitch),
        },
        Position {
            time: a.time.max(b.time),
            pitch: a.pitch.max(b.pitch),
        },
    )
}
