//! Per-frame input snapshot.
//!
//! The host fills a [`FrameInput`] from its toolkit callbacks and hands it to
//! [`EditorSession::run_frame`](crate::EditorSession::run_frame), which turns
//! it into [`InputEvent`]s in a fixed order.

use crate::canvas::ElementId;
use crate::geometry::{Point, Size};
use crate::interaction::{InputEvent, Target};
use slint::SharedString;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Delete,
    Char(char),
}

impl Key {
    /// Decode the text of a Slint key event.
    ///
    /// Slint encodes special keys as private-use characters; anything else
    /// that is a single printable character becomes [`Key::Char`].
    pub fn from_slint_text(text: &str) -> Option<Key> {
        use slint::platform::Key as SlintKey;

        let special = [
            (SlintKey::Return, Key::Enter),
            (SlintKey::Backspace, Key::Backspace),
            (SlintKey::Escape, Key::Escape),
            (SlintKey::Delete, Key::Delete),
        ];
        for (slint_key, key) in special {
            if SharedString::from(slint_key).as_str() == text {
                return Some(key);
            }
        }
        // "\n" and "\r" arrive from some platforms instead of Return.
        if text == "\n" || text == "\r" {
            return Some(Key::Enter);
        }

        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() && !is_private_use(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}

/// Arrow, function and modifier keys live in the private-use area.
fn is_private_use(c: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&c)
}

/// Everything the host observed since the previous frame.
///
/// `pointer` is in on-screen coordinates; `active` is what the toolkit
/// reports under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    pub pointer: Point,
    pub active: Target,
    pub left_pressed: bool,
    pub left_released: bool,
    /// Left button held at the end of the frame
    pub left_down: bool,
    pub right_clicked: bool,
    /// Socket or intersection whose click callback fired
    pub clicked_connector: Option<ElementId>,
    /// Keys in arrival order. Unmodified [`Key::Char`]s are the typed text.
    pub keys: Vec<Key>,
    pub ctrl: bool,
    pub moved: Vec<(ElementId, Point)>,
    pub resized: Vec<(ElementId, Size)>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self::at(Point::default())
    }
}

impl FrameInput {
    /// An idle frame with the pointer over the empty canvas.
    pub fn at(pointer: Point) -> Self {
        Self {
            pointer,
            active: Target::Canvas,
            left_pressed: false,
            left_released: false,
            left_down: false,
            right_clicked: false,
            clicked_connector: None,
            keys: Vec::new(),
            ctrl: false,
            moved: Vec::new(),
            resized: Vec::new(),
        }
    }

    /// Events in the order they are applied: toolkit move/resize
    /// notifications, keyboard, connector click, then pointer buttons.
    ///
    /// Keyboard entries keep their arrival order; runs of characters are
    /// merged into one [`InputEvent::TextTyped`]. Typed text is dropped when
    /// Enter was pressed, and with ctrl held characters are shortcuts.
    pub fn events(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        events.extend(
            self.moved
                .iter()
                .map(|&(id, position)| InputEvent::ElementMoved { id, position }),
        );
        events.extend(
            self.resized
                .iter()
                .map(|&(id, size)| InputEvent::ElementResized { id, size }),
        );

        let keep_text = !self.keys.contains(&Key::Enter);
        let mut text = String::new();
        for &key in &self.keys {
            match key {
                Key::Char(c) if !self.ctrl => {
                    if keep_text {
                        text.push(c);
                    }
                }
                key => {
                    if !text.is_empty() {
                        events.push(InputEvent::TextTyped(std::mem::take(&mut text)));
                    }
                    events.push(InputEvent::KeyPressed {
                        key,
                        ctrl: self.ctrl,
                    });
                }
            }
        }
        if !text.is_empty() {
            events.push(InputEvent::TextTyped(text));
        }

        if let Some(id) = self.clicked_connector {
            events.push(InputEvent::ConnectorClicked(id));
        }

        let target = self.active;
        let position = self.pointer;
        if self.left_pressed {
            events.push(InputEvent::PointerPressed { target, position });
        }
        if self.left_released {
            events.push(InputEvent::PointerReleased { target, position });
        }
        if self.right_clicked {
            events.push(InputEvent::RightClicked { target, position });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slint::platform::Key as SlintKey;

    #[test]
    fn test_special_keys_decode() {
        let text = |k: SlintKey| SharedString::from(k);
        assert_eq!(Key::from_slint_text(&text(SlintKey::Return)), Some(Key::Enter));
        assert_eq!(Key::from_slint_text(&text(SlintKey::Backspace)), Some(Key::Backspace));
        assert_eq!(Key::from_slint_text(&text(SlintKey::Escape)), Some(Key::Escape));
        assert_eq!(Key::from_slint_text(&text(SlintKey::Delete)), Some(Key::Delete));
        assert_eq!(Key::from_slint_text("\n"), Some(Key::Enter));
    }

    #[test]
    fn test_printable_and_unknown_text() {
        assert_eq!(Key::from_slint_text("c"), Some(Key::Char('c')));
        assert_eq!(Key::from_slint_text("ab"), None);
        assert_eq!(Key::from_slint_text(""), None);
        assert_eq!(Key::from_slint_text(&SharedString::from(SlintKey::F1)), None);
        assert_eq!(Key::from_slint_text(&SharedString::from(SlintKey::UpArrow)), None);
    }

    #[test]
    fn test_idle_frame_has_no_events() {
        assert!(FrameInput::default().events().is_empty());
    }

    #[test]
    fn test_event_order() {
        let mut input = FrameInput::at(Point::new(5.0, 6.0));
        input.keys.push(Key::Delete);
        input.keys.push(Key::Char('x'));
        input.left_pressed = true;
        input.left_released = true;

        let events = input.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            InputEvent::KeyPressed {
                key: Key::Delete,
                ctrl: false
            }
        );
        assert_eq!(events[1], InputEvent::TextTyped("x".into()));
        assert!(matches!(events[2], InputEvent::PointerPressed { .. }));
        assert_eq!(
            events[3],
            InputEvent::PointerReleased {
                target: Target::Canvas,
                position: Point::new(5.0, 6.0)
            }
        );
    }

    #[test]
    fn test_keys_keep_arrival_order() {
        let mut input = FrameInput::default();
        input.keys.extend([
            Key::Char('a'),
            Key::Char('b'),
            Key::Backspace,
            Key::Char('c'),
        ]);
        assert_eq!(
            input.events(),
            vec![
                InputEvent::TextTyped("ab".into()),
                InputEvent::KeyPressed {
                    key: Key::Backspace,
                    ctrl: false
                },
                InputEvent::TextTyped("c".into()),
            ]
        );
    }

    #[test]
    fn test_enter_swallows_typed_text() {
        let mut input = FrameInput::default();
        input.keys.extend([Key::Char('a'), Key::Enter, Key::Char('b')]);
        assert_eq!(
            input.events(),
            vec![InputEvent::KeyPressed {
                key: Key::Enter,
                ctrl: false
            }]
        );
    }

    #[test]
    fn test_ctrl_turns_characters_into_shortcuts() {
        let mut input = FrameInput::default();
        input.ctrl = true;
        input.keys.push(Key::Char('c'));
        assert_eq!(
            input.events(),
            vec![InputEvent::KeyPressed {
                key: Key::Char('c'),
                ctrl: true
            }]
        );
    }
}
