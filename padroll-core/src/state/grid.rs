/// Beats in one bar; grid divisions are counted per bar.
pub const BEATS_PER_BAR: f64 = 4.0;
pub const MIN_DIVISIONS: u32 = 2;
pub const MAX_DIVISIONS: u32 = 64;
pub const DEFAULT_DIVISIONS: u32 = 4;

/// Beats per grid cell for a division count.
///
/// Divisions are steps per 4-beat bar:
/// - 4: 1 beat (quarter note)
/// - 8: 1/2 beat (eighth note)
/// - 16: 1/4 beat (sixteenth note)
///
/// A zero division count is treated as the default.
pub fn step_beats(divisions: u32) -> f64 {
    let divisions = if divisions == 0 {
        DEFAULT_DIVISIONS
    } else {
        divisions
    };
    BEATS_PER_BAR / divisions as f64
}

/// Finer grid: twice the divisions, capped at [`MAX_DIVISIONS`].
pub fn finer(divisions: u32) -> u32 {
    if divisions < MAX_DIVISIONS {
        (divisions * 2).min(MAX_DIVISIONS)
    } else {
        divisions
    }
}

/// Coarser grid: half the divisions, floored at [`MIN_DIVISIONS`].
pub fn coarser(divisions: u32) -> u32 {
    if divisions > MIN_DIVISIONS {
        (divisions / 2).max(MIN_DIVISIONS)
    } else {
        divisions
    }
}
