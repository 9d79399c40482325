//! Test harness driving an [`EditorController`] frame by frame.
//!
//! Every helper records input through the controller's callbacks and runs
//! the frames a real host would, so tests exercise the same path as an
//! application: callback -> pending input -> frame -> session.

#![allow(dead_code)]

use super::init_logging;
use slint::platform::Key as SlintKey;
use slint::{SharedString, VecModel};
use slint_graph_canvas::{
    DrawCommand, EditorConfig, EditorController, EditorSession, ElementId, Point, Target,
};
use std::rc::Rc;

/// Row type standing in for a `.slint` struct bound to edge paths.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePathRow {
    pub id: i32,
    pub commands: SharedString,
    pub color: slint::Color,
    pub width: f32,
}

pub struct EditorHarness {
    pub ctrl: EditorController,
    pub paths: Rc<VecModel<EdgePathRow>>,
    key_pressed: Box<dyn Fn(SharedString) -> bool>,
    pointer_moved: Box<dyn Fn(f32, f32)>,
}

impl EditorHarness {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        init_logging();
        let ctrl = EditorController::with_config(config);
        let paths = Rc::new(VecModel::<EdgePathRow>::default());
        ctrl.bind_model(paths.clone(), |id, commands, color, width| EdgePathRow {
            id,
            commands,
            color,
            width,
        });
        Self {
            key_pressed: Box::new(ctrl.key_pressed_callback()),
            pointer_moved: Box::new(ctrl.pointer_moved_callback()),
            ctrl,
            paths,
        }
    }

    /// Read the session. Do not hold the borrow across a frame.
    pub fn with_session<T>(&self, f: impl FnOnce(&EditorSession) -> T) -> T {
        f(&self.ctrl.session().borrow())
    }

    /// Mutate the session directly, outside of any frame.
    pub fn with_session_mut<T>(&self, f: impl FnOnce(&mut EditorSession) -> T) -> T {
        f(&mut self.ctrl.session().borrow_mut())
    }

    pub fn frame(&self) {
        self.ctrl.frame();
    }

    /// Draw calls of the last frame.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.ctrl.recorder().borrow().commands().to_vec()
    }

    // === Pointer helpers ===

    pub fn move_pointer(&self, x: f32, y: f32) {
        (self.pointer_moved)(x, y);
        self.frame();
    }

    pub fn press(&self, target: Target, x: f32, y: f32) {
        self.ctrl.handle_pointer_pressed(target, x, y);
        self.frame();
    }

    pub fn release(&self, target: Target, x: f32, y: f32) {
        self.ctrl.handle_pointer_released(target, x, y);
        self.frame();
    }

    /// Press and release on the empty canvas in two frames.
    pub fn click_canvas(&self, x: f32, y: f32) {
        self.press(Target::Canvas, x, y);
        self.release(Target::Canvas, x, y);
    }

    /// Drag a rectangle on the empty canvas, with one frame of movement in between.
    pub fn drag_canvas(&self, from: Point, to: Point) {
        self.press(Target::Canvas, from.x, from.y);
        self.move_pointer(to.x, to.y);
        self.release(Target::Canvas, to.x, to.y);
    }

    /// The toolkit's click callback on a socket or intersection.
    pub fn click_connector(&self, id: ElementId) {
        self.ctrl.handle_connector_clicked(id);
        self.frame();
    }

    pub fn right_click(&self, target: Target, x: f32, y: f32) {
        self.ctrl.handle_right_click(target, x, y);
        self.frame();
    }

    // === Keyboard helpers ===

    pub fn key(&self, key: SlintKey) {
        assert!((self.key_pressed)(key.into()), "key {key:?} was not accepted");
        self.frame();
    }

    /// Ctrl + `c` in one frame.
    pub fn ctrl_key(&self, c: char) {
        self.ctrl.set_ctrl(true);
        (self.key_pressed)(SharedString::from(c.to_string().as_str()));
        self.frame();
        self.ctrl.set_ctrl(false);
    }

    /// Type `text` one character per key event, in a single frame.
    pub fn type_text(&self, text: &str) {
        for c in text.chars() {
            (self.key_pressed)(SharedString::from(c.to_string().as_str()));
        }
        self.frame();
    }
}
