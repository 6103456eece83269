//! Converts raw platform events into pick requests.
//!
//! `PickInput` owns the transient click state (cursor position, press
//! position, drag detection, modifier keys). A left press followed by a
//! release close to the same spot is a click and yields one
//! [`PickRequest`]; anything that travelled further is a drag and yields
//! nothing.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::options::{InputOptions, PickingOptions};
use crate::picking::PickRequest;

/// Turns click gestures into [`PickRequest`]s.
///
/// # Usage
///
/// ```ignore
/// for event in window_events {
///     if let Some(request) = pick_input.handle_event(event) {
///         session.request_pick(request);
///     }
/// }
/// session.tick(&mut host);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PickInput {
    picking: PickingOptions,
    input: InputOptions,
    /// Current cursor position in physical pixels.
    cursor: Vec2,
    /// Cursor position at the left press, while the button is held.
    press: Option<Vec2>,
    /// Set once the held cursor leaves the click radius.
    dragging: bool,
    shift_pressed: bool,
}

impl PickInput {
    /// Processor building requests from `picking` defaults and recognising
    /// clicks with `input`.
    #[must_use]
    pub fn new(picking: PickingOptions, input: InputOptions) -> Self {
        Self {
            picking,
            input,
            ..Self::default()
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether the left button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has turned into a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Replace the options used for future gestures.
    pub fn set_options(&mut self, picking: PickingOptions, input: InputOptions) {
        self.picking = picking;
        self.input = input;
    }

    /// Forget the current press without producing a request.
    ///
    /// Used by hosts that hand the mouse to another tool mid-gesture.
    pub fn release_mouse_state(&mut self) {
        self.press = None;
        self.dragging = false;
    }

    /// Process a raw input event and return a pick request when it
    /// completes a click.
    ///
    /// Shift-clicks also consider transparent renderers and faint UI
    /// graphics.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<PickRequest> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y));
                None
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        if let Some(press) = self.press {
            if press.distance(position) > self.input.click_drag_threshold {
                self.dragging = true;
            }
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<PickRequest> {
        if button != MouseButton::Left {
            return None;
        }
        if pressed {
            self.press = Some(self.cursor);
            self.dragging = false;
            return None;
        }

        // Release without a tracked press (e.g. focus gained mid-gesture)
        let press = self.press.take()?;
        let was_dragging = std::mem::take(&mut self.dragging);
        if was_dragging || press.distance(self.cursor) > self.input.click_drag_threshold {
            log::trace!("drag from {press:?} to {:?}; no pick", self.cursor);
            return None;
        }

        let request = PickRequest::from_options(self.cursor, &self.picking);
        Some(request.including_transparent(request.include_transparent || self.shift_pressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn left(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    fn run(input: &mut PickInput, events: &[InputEvent]) -> Vec<PickRequest> {
        events.iter().filter_map(|e| input.handle_event(*e)).collect()
    }

    #[test]
    fn click_yields_request_at_release_point() {
        let mut input = PickInput::default();
        let requests = run(
            &mut input,
            &[moved(100.0, 50.0), left(true), moved(102.0, 51.0), left(false)],
        );
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].screen, Vec2::new(102.0, 51.0));
        assert!(!requests[0].include_transparent);
        assert!(!input.mouse_pressed());
    }

    #[test]
    fn drag_yields_nothing() {
        let mut input = PickInput::default();
        let requests = run(
            &mut input,
            &[moved(100.0, 50.0), left(true), moved(140.0, 50.0), left(false)],
        );
        assert!(requests.is_empty());
    }

    #[test]
    fn drag_that_returns_to_start_is_still_a_drag() {
        let mut input = PickInput::default();
        let requests = run(
            &mut input,
            &[
                moved(100.0, 50.0),
                left(true),
                moved(160.0, 50.0),
                moved(100.0, 50.0),
                left(false),
            ],
        );
        assert!(requests.is_empty());
        assert!(!input.is_dragging());
    }

    #[test]
    fn other_buttons_do_not_pick() {
        let mut input = PickInput::default();
        let requests = run(
            &mut input,
            &[
                InputEvent::MouseButton {
                    button: MouseButton::Right,
                    pressed: true,
                },
                InputEvent::MouseButton {
                    button: MouseButton::Right,
                    pressed: false,
                },
            ],
        );
        assert!(requests.is_empty());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut input = PickInput::default();
        assert!(input.handle_event(left(false)).is_none());
    }

    #[test]
    fn released_state_swallows_the_click() {
        let mut input = PickInput::default();
        let _ = input.handle_event(left(true));
        input.release_mouse_state();
        assert!(input.handle_event(left(false)).is_none());
    }

    #[test]
    fn threshold_comes_from_options() {
        let mut input = PickInput::new(
            PickingOptions::default(),
            InputOptions {
                click_drag_threshold: 50.0,
            },
        );
        let requests = run(
            &mut input,
            &[moved(100.0, 50.0), left(true), moved(140.0, 50.0), left(false)],
        );
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn shift_click_includes_transparent_hits() {
        let mut input = PickInput::new(
            PickingOptions {
                display: 2,
                ..PickingOptions::default()
            },
            InputOptions::default(),
        );
        let requests = run(
            &mut input,
            &[
                InputEvent::ModifiersChanged { shift: true },
                left(true),
                left(false),
            ],
        );
        assert_eq!(requests.len(), 1);
        assert!(requests[0].include_transparent);
        assert_eq!(requests[0].display, 2);
    }
}
