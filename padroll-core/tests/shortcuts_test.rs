mod common;

use common::*;
use padroll_core::{Mode, Note, Position, STATUS_CONNECTED, STATUS_SEARCHING};

#[test]
fn start_combos_adjust_mixer_without_switching_track() {
    let mut pad = Pad::new();
    pad.frame(&[START]);
    pad.frame(&[START, UP]);
    assert!((pad.host.tracks[0].volume - 0.85).abs() < 1e-6);
    assert_eq!(pad.host.last_status(), Some("Vol: 0.85"));

    pad.frame(&[START]);
    pad.frame(&[START, LEFT]);
    assert!((pad.host.tracks[0].pan + 0.1).abs() < 1e-6);
    assert_eq!(pad.host.last_status(), Some("Pan: -0.1"));
    assert_eq!(pad.host.pans.len(), 1);

    pad.frame(&[START, A]);
    assert!(pad.host.tracks[0].solo);
    assert_eq!(pad.host.last_status(), Some("Solo: ON"));
    pad.frame(&[START, B]);
    assert!(pad.host.tracks[0].muted);
    assert_eq!(pad.host.last_status(), Some("Mute: ON"));

    pad.frame(&[]);
    assert_eq!(pad.host.current, 0, "combo suppresses the tap");
    assert!(pad.host.notes().is_empty(), "A under START does not place");
}

#[test]
fn start_volume_clamps() {
    let mut pad = Pad::new();
    pad.host.tracks[0].volume = 0.98;
    pad.frame(&[START]);
    pad.frame(&[START, UP]);
    assert_eq!(pad.host.tracks[0].volume, 1.0);
    assert_eq!(pad.host.volumes, vec![(0, 1.0)]);
}

#[test]
fn start_stick_edges_count_as_combos() {
    let mut pad = Pad::new();
    pad.frame(&[START]);
    pad.frame_axes(&[START], 0.0, 0.9);
    pad.frame_axes(&[START], 0.0, 0.95);
    assert!((pad.host.tracks[0].volume - 0.75).abs() < 1e-6);
    pad.frame(&[]);
    assert_eq!(pad.host.current, 0);
}

#[test]
fn start_tap_cycles_tracks() {
    let mut pad = Pad::new();
    pad.tap(START);
    assert_eq!(pad.host.current, 1);
    assert_eq!(pad.host.last_status(), Some("Track: 2"));

    pad.host.current = 7;
    pad.frame(&[]);
    pad.tap(START);
    assert_eq!(pad.host.current, 0);
}

#[test]
fn start_long_press_opens_list_once_and_tap_closes_it() {
    let mut pad = Pad::new();
    pad.hold(&[START], 700);
    assert_eq!(pad.host.aux_opened, 1);
    assert!(pad.host.aux_open);
    pad.frame(&[]);
    assert_eq!(pad.host.current, 0);

    pad.tap(START);
    assert!(!pad.host.aux_open);
    assert_eq!(pad.host.current, 0, "closing tap does not switch track");
}

#[test]
fn start_blocks_cursor_movement() {
    let mut pad = Pad::new();
    pad.controller.set_cursor(Position::new(4.0, 60));
    pad.frame(&[START, RIGHT]);
    assert_eq!(pad.controller.mode(), Mode::TrackShortcut);
    assert_eq!(pad.cursor(), Position::new(4.0, 60));
}

#[test]
fn r2_changes_grid_and_blocks_horizontal_movement() {
    let mut pad = Pad::new();
    pad.controller.set_cursor(Position::new(4.0, 60));

    pad.frame(&[R2, LEFT]);
    assert_eq!(pad.host.divisions, 8);
    assert_eq!(pad.host.last_status(), Some("Grid: 1/8"));
    pad.frame(&[R2, LEFT]);
    assert_eq!(pad.host.divisions, 8, "edge only");
    assert_eq!(pad.cursor().time, 4.0);

    pad.frame(&[R2]);
    pad.frame(&[R2, RIGHT]);
    pad.frame(&[R2]);
    pad.frame(&[R2, RIGHT]);
    assert_eq!(pad.host.divisions, 2);
    pad.frame(&[R2]);
    pad.frame(&[R2, RIGHT]);
    assert_eq!(pad.host.divisions, 2, "floored");

    pad.frame(&[R2, UP]);
    assert_eq!(pad.cursor(), Position::new(4.0, 61), "vertical still moves");
}

#[test]
fn r2_grid_caps_at_64() {
    let mut pad = Pad::new();
    pad.host.divisions = 64;
    pad.frame(&[R2, LEFT]);
    assert_eq!(pad.host.divisions, 64);
    assert!(pad.host.statuses.iter().all(|s| !s.starts_with("Grid")));
}

#[test]
fn r2_stick_needs_high_threshold() {
    let mut pad = Pad::new();
    pad.frame_axes(&[R2], -0.5, 0.0);
    assert_eq!(pad.host.divisions, 4);
    pad.frame_axes(&[R2], -0.8, 0.0);
    assert_eq!(pad.host.divisions, 8);
    pad.frame_axes(&[R2], -0.9, 0.0);
    assert_eq!(pad.host.divisions, 8);
}

#[test]
fn x_toggles_playback_from_cursor() {
    let mut pad = Pad::new();
    pad.controller.set_cursor(Position::new(3.0, 60));
    pad.tap(X);
    assert!(pad.host.playing);
    assert_eq!(pad.host.played_from, vec![3.0]);
    assert_eq!(pad.host.audio_inits, 1);

    pad.tap(X);
    assert!(!pad.host.playing);
}

#[test]
fn x_plays_from_loop_start_when_looping() {
    let mut pad = Pad::new();
    pad.host.looping = true;
    pad.host.loop_region = Some((8.0, 12.0));
    pad.tap(X);
    assert_eq!(pad.host.played_from, vec![8.0]);
}

#[test]
fn select_sets_loop_from_selection() {
    let mut pad = Pad::new();
    let notes = vec![Note::new(1.0, 60, 1.0, 100), Note::new(3.0, 62, 2.0, 100)];
    pad.host.set_notes(notes);
    pad.select(Position::new(1.0, 60), Position::new(3.0, 62));

    pad.tap(SELECT);
    assert_eq!(pad.host.loop_region, Some((1.0, 5.0)));
    assert!(pad.host.looping);
    assert_eq!(pad.host.last_toast(), Some("Loop Set: 1.0 - 5.0"));
}

#[test]
fn select_without_selection_toggles_looping() {
    let mut pad = Pad::new();
    pad.tap(SELECT);
    assert!(pad.host.looping);
    assert_eq!(pad.host.last_toast(), Some("Loop ON"));
    pad.tap(SELECT);
    assert_eq!(pad.host.last_toast(), Some("Loop OFF"));
}

#[test]
fn empty_history_gives_feedback() {
    let mut pad = Pad::new();
    pad.tap(L1);
    assert_eq!(pad.host.last_toast(), Some("Nothing to undo"));
    pad.tap(R1);
    assert_eq!(pad.host.last_toast(), Some("Nothing to redo"));
}

#[test]
fn missing_controller_reports_searching_and_mutates_nothing() {
    let mut pad = Pad::new();
    let outcome = pad.disconnected();
    assert_eq!(outcome.mode, Mode::Disconnected);
    assert_eq!(pad.controller.status(), STATUS_SEARCHING);
    assert_eq!(pad.host.last_status(), Some(STATUS_SEARCHING));

    pad.frame(&[A]);
    assert_eq!(pad.controller.status(), STATUS_CONNECTED);
    assert_eq!(pad.host.notes().len(), 1);

    pad.disconnected();
    pad.disconnected();
    let statuses = &pad.host.statuses;
    let searching = statuses.iter().filter(|s| *s == STATUS_SEARCHING).count();
    assert_eq!(searching, 2);

    pad.frame(&[A]);
    let placed = pad.host.notes().len();
    assert_eq!(placed, 1, "held A across the gap is not a new press");
}

#[test]
fn start_released_during_disconnect_does_not_switch_track() {
    let mut pad = Pad::new();
    pad.frame(&[START]);
    pad.disconnected();
    pad.disconnected();

    pad.frame(&[]);
    pad.frame(&[]);
    assert_eq!(pad.host.current, 0);
    assert!(pad.host.statuses.iter().all(|s| !s.starts_with("Track:")));
    assert_eq!(pad.controller.status(), STATUS_CONNECTED);

    pad.tap(START);
    assert_eq!(pad.host.current, 1);
}

#[test]
fn b_held_across_disconnect_does_not_delete() {
    let mut pad = Pad::new();
    pad.host.set_notes(vec![Note::new(1.0, 60, 1.0, 100)]);
    pad.select(Position::new(1.0, 60), Position::new(1.0, 60));
    pad.frame(&[B]);
    pad.disconnected();

    pad.hold(&[B], 400);
    assert_eq!(pad.host.notes().len(), 1);
    pad.frame(&[]);
    assert!(!pad.controller.has_clipboard(), "no tap is seen either");
}
