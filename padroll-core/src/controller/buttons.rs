use super::{Frame, GamepadController};
use crate::error::ControllerError;
use crate::host::EditorHost;
use crate::input::LogicalButton;
use crate::state::Track;

const VOLUME_STEP: f32 = 0.05;
const PAN_STEP: f32 = 0.1;

impl GamepadController {
    /// START released: a tap with no combo and no long press closes the aux
    /// list if open, otherwise advances to the next track.
    pub(super) fn start_release<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        if !frame.released(LogicalButton::Start) {
            return Ok(());
        }
        let Some((held_ms, handled)) = self.start_press.release(frame.now_ms) else {
            return Ok(());
        };
        if handled || held_ms >= self.config.start_long_press_ms {
            return Ok(());
        }

        if host.aux_list_open() {
            host.close_aux_list();
            return Ok(());
        }
        let count = self.config.track_count.max(1);
        let next = (host.current_track_id() + 1) % count;
        if host.track(next).is_none() {
            return Err(ControllerError::TrackNotFound(next));
        }
        host.set_current_track_id(next);
        self.last_track = Some(next);
        self.clear_selection();
        host.update_status(&format!("Track: {}", next + 1));
        Ok(())
    }

    /// START held: mixer shortcuts on the current track, then the long-press check.
    pub(super) fn track_shortcuts<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        if frame.pressed(LogicalButton::Start) {
            self.start_press.press(frame.now_ms);
        }

        let id = host.current_track_id();
        let up = frame.pressed(LogicalButton::Up) || frame.stick_y_edge > 0;
        let down = frame.pressed(LogicalButton::Down) || frame.stick_y_edge < 0;
        let left = frame.pressed(LogicalButton::Left) || frame.stick_x_edge < 0;
        let right = frame.pressed(LogicalButton::Right) || frame.stick_x_edge > 0;

        let volume_delta = match (up, down) {
            (true, false) => Some(VOLUME_STEP),
            (false, true) => Some(-VOLUME_STEP),
            _ => None,
        };
        if let Some(delta) = volume_delta {
            let volume = track_mut(host, id)?.adjust_volume(delta);
            host.set_track_volume(id, volume);
            host.update_status(&format!("Vol: {:.2}", volume));
            self.start_press.mark_handled();
        }

        let pan_delta = match (left, right) {
            (true, false) => Some(-PAN_STEP),
            (false, true) => Some(PAN_STEP),
            _ => None,
        };
        if let Some(delta) = pan_delta {
            let pan = track_mut(host, id)?.adjust_pan(delta);
            host.set_track_pan(id, pan);
            host.update_status(&format!("Pan: {:.1}", pan));
            self.start_press.mark_handled();
        }

        if frame.pressed(LogicalButton::A) {
            let track = track_mut(host, id)?;
            track.solo = !track.solo;
            let msg = format!("Solo: {}", on_off(track.solo));
            host.update_status(&msg);
            self.start_press.mark_handled();
        }
        if frame.pressed(LogicalButton::B) {
            let track = track_mut(host, id)?;
            track.muted = !track.muted;
            let msg = format!("Mute: {}", on_off(track.muted));
            host.update_status(&msg);
            self.start_press.mark_handled();
        }

        let threshold = self.config.start_long_press_ms;
        let long_press = self
            .start_press
            .held_for(frame.now_ms)
            .is_some_and(|ms| ms >= threshold);
        if long_press && !self.start_press.is_handled() {
            log::debug!("START long press");
            host.open_aux_list();
            self.start_press.mark_handled();
        }
        Ok(())
    }

    /// Discrete action buttons: A (copy/paste/place), B (tap/hold), X (play), SELECT (loop).
    pub(super) fn action_buttons<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        if frame.pressed(LogicalButton::A) && !frame.moving() {
            if self.selection.is_active() {
                self.editor.copy_selection(host, &mut self.selection)?;
            } else if self.editor.has_clipboard() {
                self.editor.paste(host, self.cursor)?;
            } else {
                self.editor.place_note(host, self.cursor)?;
            }
        }

        self.secondary_button(frame, host)?;

        if frame.pressed(LogicalButton::X) {
            self.play_stop(host);
        }
        if frame.pressed(LogicalButton::Select) {
            self.set_loop(host)?;
        }

        // Placing or pasting mid-drag changes the note list under the rectangle.
        self.refresh_drag(host)
    }

    /// B: hold past the tap threshold deletes the selection once; a short tap
    /// copies the selection, or clears the clipboard when nothing is selected.
    fn secondary_button<H: EditorHost>(
        &mut self,
        frame: &Frame,
        host: &mut H,
    ) -> Result<(), ControllerError> {
        let tap_ms = self.config.secondary_tap_ms;
        if frame.pressed(LogicalButton::B) {
            self.secondary_press.press(frame.now_ms);
        }

        if frame.held(LogicalButton::B) && !self.secondary_press.is_handled() {
            let held_ms = self.secondary_press.held_for(frame.now_ms);
            let long = held_ms.is_some_and(|ms| ms >= tap_ms);
            if long && self.selection.is_active() {
                self.secondary_press.mark_handled();
                self.editor.delete_selected(host, &mut self.selection)?;
            }
        }

        if frame.released(LogicalButton::B) {
            if let Some((held_ms, false)) = self.secondary_press.release(frame.now_ms) {
                if held_ms < tap_ms {
                    if self.selection.is_active() {
                        self.editor.copy_selection(host, &mut self.selection)?;
                    } else {
                        self.editor.clear_clipboard(host);
                    }
                }
            }
        }
        Ok(())
    }

    fn play_stop<H: EditorHost>(&mut self, host: &mut H) {
        if host.is_playing() {
            host.stop();
            return;
        }
        host.init();
        host.resume();
        let from = match host.loop_region() {
            Some((start, _)) if host.is_looping() => start,
            _ => self.cursor.time,
        };
        log::debug!("Play from beat {}", from);
        host.play_from(from);
    }

    fn set_loop<H: EditorHost>(&mut self, host: &mut H) -> Result<(), ControllerError> {
        if self.selection.is_active() {
            let id = host.current_track_id();
            let track = host.track(id).ok_or(ControllerError::TrackNotFound(id))?;
            let bounds = self.selection.selected(&track.notes).fold(None, |acc, n| {
                Some(match acc {
                    Some((start, end)) => (f64::min(start, n.time), f64::max(end, n.end())),
                    None => (n.time, n.end()),
                })
            });
            if let Some((start, end)) = bounds {
                host.set_loop_region(start, end);
                host.set_looping(true);
                host.show_toast(&format!("Loop Set: {:.1} - {:.1}", start, end));
                return Ok(());
            }
        }

        let looping = !host.is_looping();
        host.set_looping(looping);
        host.show_toast(if looping { "Loop ON" } else { "Loop OFF" });
        Ok(())
    }
}

fn track_mut<H: EditorHost>(host: &mut H, id: usize) -> Result<&mut Track, ControllerError> {
    host.track_mut(id).ok_or(ControllerError::TrackNotFound(id))
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}
