//! Pointer and keyboard interaction.
//!
//! The editor is always in exactly one [`DragMode`]. Each [`InputEvent`] is
//! fed through [`EditorSession::handle`], which is the single transition
//! function of the state machine:
//!
//! ```text
//!            connector click                 click on same connector
//!   Idle ───────────────────────▶ LineDrawing ─────────────────────────▶ Idle
//!    ▲ │                          │  │ click on socket: commit edge ────▶ Idle
//!    │ │ press on canvas          │  │ click on intersection: commit edge,
//!    │ ▼                          │  │   stay in LineDrawing from it
//!   RectDrawing                   │  └ release on canvas ───────────────▶ Idle
//!    │ release on canvas: group or new node, release elsewhere: cancel ─▶ Idle
//! ```

use crate::canvas::{ElementId, ElementKind};
use crate::geometry::{Point, Rect, Size};
use crate::input::Key;
use crate::session::EditorSession;

/// Current pointer-drag mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    /// A line is being drawn from `anchor` (a socket or intersection)
    LineDrawing { anchor: ElementId },
    /// A selection rectangle is being drawn from `origin` (canvas space)
    RectDrawing { origin: Point },
}

/// What the pointer is over, as resolved by the widget toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Empty canvas surface
    Canvas,
    Element(ElementId),
}

/// A discrete input event for one frame.
///
/// Pointer positions are on-screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The toolkit's click callback fired on a socket or intersection
    ConnectorClicked(ElementId),
    PointerPressed { target: Target, position: Point },
    PointerReleased { target: Target, position: Point },
    RightClicked { target: Target, position: Point },
    KeyPressed { key: Key, ctrl: bool },
    TextTyped(String),
    /// The toolkit dragged an element to a new position relative to its parent
    ElementMoved { id: ElementId, position: Point },
    ElementResized { id: ElementId, size: Size },
}

impl EditorSession {
    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) {
        log::trace!("event {event:?} in {:?}", self.mode);
        match event {
            InputEvent::ConnectorClicked(id) => self.on_connector_clicked(id),
            InputEvent::PointerPressed { target, position } => {
                self.on_pointer_pressed(target, position)
            }
            InputEvent::PointerReleased { target, position } => {
                self.on_pointer_released(target, position)
            }
            InputEvent::RightClicked { target, position } => {
                self.on_right_clicked(target, position)
            }
            InputEvent::KeyPressed { key, ctrl } => self.on_key(key, ctrl),
            InputEvent::TextTyped(text) => self.on_text(&text),
            InputEvent::ElementMoved { id, position } => {
                if let Err(err) = self.move_element(id, position) {
                    log::warn!("ignoring move: {err}");
                }
            }
            InputEvent::ElementResized { id, size } => {
                if let Err(err) = self.resize_element(id, size) {
                    log::warn!("ignoring resize: {err}");
                }
            }
        }
    }

    fn set_mode(&mut self, mode: DragMode) {
        if self.mode != mode {
            log::debug!("drag mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn on_connector_clicked(&mut self, clicked: ElementId) {
        let kind = match self.canvas.kind(clicked) {
            Some(kind) if kind.is_connector() => kind,
            other => {
                log::warn!("click on {clicked:?} ({other:?}) is not a connector");
                return;
            }
        };

        match self.mode {
            DragMode::LineDrawing { anchor } if anchor == clicked => {
                // Clicking the origin again cancels the line.
                self.set_mode(DragMode::Idle);
            }
            DragMode::LineDrawing { anchor } => {
                self.edges.add(anchor, clicked, self.palette.secondary);
                if kind == ElementKind::Intersection {
                    self.set_mode(DragMode::LineDrawing { anchor: clicked });
                } else {
                    self.set_mode(DragMode::Idle);
                }
            }
            DragMode::Idle | DragMode::RectDrawing { .. } => {
                self.set_mode(DragMode::LineDrawing { anchor: clicked });
            }
        }
    }

    fn on_pointer_pressed(&mut self, target: Target, position: Point) {
        self.pointer = position;
        self.button_down = true;
        match target {
            Target::Canvas => {
                if self.mode == DragMode::Idle {
                    let origin = self.canvas.to_canvas(position);
                    self.set_mode(DragMode::RectDrawing { origin });
                }
            }
            Target::Element(id) => self.focus_pressed(id),
        }
    }

    /// Focus the pressed element. Pressing inside a node also selects its
    /// label; pressing anything else ends the text edit.
    fn focus_pressed(&mut self, id: ElementId) {
        if !self.canvas.contains(id) {
            return;
        }
        self.refs.set_focus(Some(id));
        match self
            .canvas
            .enclosing(id, ElementKind::Node)
            .and_then(|node| self.canvas.label_of(node))
        {
            Some(label) if self.refs.selected_label() != Some(label) => {
                self.refs.select_label(label)
            }
            Some(_) => {}
            None => self.refs.clear_selection(),
        }
    }

    fn on_pointer_released(&mut self, target: Target, position: Point) {
        self.pointer = position;
        self.button_down = false;
        match (target, self.mode) {
            (Target::Canvas, DragMode::LineDrawing { .. }) => {
                self.set_mode(DragMode::Idle);
            }
            (Target::Canvas, DragMode::RectDrawing { origin }) => {
                self.set_mode(DragMode::Idle);
                let release = self.canvas.to_canvas(position);
                let threshold = self.config.drag_threshold;
                let dragged = (release.x - origin.x).abs() >= threshold
                    && (release.y - origin.y).abs() >= threshold;
                if dragged {
                    self.group_rect(Rect::from_corners(origin, release));
                } else {
                    let top_left = self.config.node_origin_centered_on(release);
                    self.create_node(top_left);
                }
            }
            (Target::Element(_), DragMode::RectDrawing { .. }) => {
                self.set_mode(DragMode::Idle);
            }
            _ => {}
        }
    }

    fn on_right_clicked(&mut self, target: Target, position: Point) {
        self.pointer = position;
        match target {
            Target::Canvas => {
                self.set_mode(DragMode::Idle);
                self.refs.set_focus(None);
                self.refs.clear_selection();
                let center = self.canvas.to_canvas(position);
                self.create_intersection(center);
            }
            Target::Element(id) => {
                if let Some(edge) = self.edges.find_last_touching(id) {
                    self.edges.remove(edge);
                }
            }
        }
    }

    fn on_key(&mut self, key: Key, ctrl: bool) {
        match key {
            Key::Enter if !ctrl => self.on_enter(),
            Key::Backspace => {
                if !self.delete_node_with_empty_label() {
                    self.erase_last_char();
                }
            }
            Key::Escape => {
                if !self.delete_node_with_empty_label() {
                    log::debug!("escape with nothing to delete, stopping");
                    self.running = false;
                }
            }
            Key::Delete => self.delete_focused(),
            Key::Char(c) if ctrl && c.eq_ignore_ascii_case(&'c') => self.copy(),
            Key::Char(c) if ctrl && c.eq_ignore_ascii_case(&'v') => {
                self.paste();
            }
            _ => {}
        }
    }

    fn on_enter(&mut self) {
        let below_selected = self
            .refs
            .selected_label()
            .and_then(|label| self.canvas.parent(label))
            .and_then(|node| self.canvas.canvas_bounds(node));

        match below_selected {
            Some(bounds) => {
                let position = Point::new(bounds.x, bounds.bottom() + self.config.new_node_gap);
                self.create_node(position);
            }
            None => {
                self.spawn_node();
            }
        }
    }

    /// Delete the node whose label is selected if that label is empty.
    fn delete_node_with_empty_label(&mut self) -> bool {
        let Some(label) = self.refs.selected_label() else {
            return false;
        };
        if !self.canvas.text(label).is_some_and(str::is_empty) {
            return false;
        }
        let Some(node) = self.canvas.parent(label) else {
            return false;
        };
        self.refs.clear_selection();
        self.delete_node(node).is_ok()
    }

    fn erase_last_char(&mut self) {
        if let Some(text) = self
            .refs
            .selected_label()
            .and_then(|label| self.canvas.text_mut(label))
        {
            text.pop();
        }
    }

    fn on_text(&mut self, text: &str) {
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if printable.is_empty() {
            return;
        }
        if self.refs.selection().is_none() {
            self.spawn_node();
        }
        if let Some(buffer) = self
            .refs
            .selected_label()
            .and_then(|label| self.canvas.text_mut(label))
        {
            buffer.push_str(&printable);
        }
    }
}
