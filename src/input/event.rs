/// Platform-agnostic input events.
///
/// These are fed into a [`PickInput`](super::PickInput) which turns
/// completed clicks into [`PickRequest`](crate::picking::PickRequest)s.
///
/// # Example
///
/// ```ignore
/// if let Some(request) = pick_input.handle_event(InputEvent::MouseButton {
///     button: MouseButton::Left,
///     pressed: false,
/// }) {
///     session.request_pick(request);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels, growing downward.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}
