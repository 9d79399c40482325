//! Shared controller for Slint applications.
//!
//! [`EditorController`] wraps an [`EditorSession`] so it can be captured by
//! many toolkit callbacks at once. Pointer, key, click, move and resize
//! callbacks record into a pending [`FrameInput`] that is applied when the
//! host runs a frame. Scroll, palette and label-edit callbacks write to the
//! session immediately.
//!
//! # Example
//!
//! ```ignore
//! use slint_graph_canvas::{EditorController, Target};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = EditorController::new();
//!
//!     // Edge paths are rendered by a `for path in edge-paths: Path { ... }`
//!     let paths = std::rc::Rc::new(slint::VecModel::<EdgePathRow>::default());
//!     ctrl.bind_model(paths.clone(), |id, commands, color, width| EdgePathRow {
//!         id,
//!         commands,
//!         color: color.into(),
//!         width,
//!     });
//!     window.set_edge_paths(paths.into());
//!
//!     window.on_pointer_moved(ctrl.pointer_moved_callback());
//!     window.on_key_pressed(ctrl.key_pressed_callback());
//!     window.on_scrolled(ctrl.scroll_callback());
//!     window.on_primary_color_changed(ctrl.primary_color_callback());
//!     window.on_secondary_color_changed(ctrl.secondary_color_callback());
//!
//!     let timer = slint::Timer::default();
//!     timer.start(slint::TimerMode::Repeated, std::time::Duration::from_millis(16), {
//!         let ctrl = ctrl.clone();
//!         move || ctrl.frame()
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::canvas::ElementId;
use crate::config::EditorConfig;
use crate::geometry::{Point, Size};
use crate::input::{FrameInput, Key};
use crate::interaction::Target;
use crate::render::{CommandRecorder, ModelSyncer, PathModelSync, Renderer};
use crate::session::EditorSession;
use slint::{Color, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller that owns the editor session and provides callback implementations.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct EditorController {
    session: Rc<RefCell<EditorSession>>,
    pending: Rc<RefCell<FrameInput>>,
    recorder: Rc<RefCell<CommandRecorder>>,
    syncer: Rc<RefCell<Option<Box<dyn ModelSyncer>>>>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    /// Create a new controller with default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            session: Rc::new(RefCell::new(EditorSession::new(config))),
            pending: Rc::new(RefCell::new(FrameInput::default())),
            recorder: Rc::new(RefCell::new(CommandRecorder::new())),
            syncer: Rc::new(RefCell::new(None)),
        }
    }

    /// Get access to the editor session.
    pub fn session(&self) -> Rc<RefCell<EditorSession>> {
        self.session.clone()
    }

    /// Draw calls of the last frame run through [`frame`](Self::frame).
    pub fn recorder(&self) -> Rc<RefCell<CommandRecorder>> {
        self.recorder.clone()
    }

    /// Keep `model` in sync with the routed edges after every frame.
    pub fn bind_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(i32, SharedString, Color, f32) -> P + 'static,
    {
        let sync = PathModelSync::new(model, constructor);
        sync.sync(&self.session.borrow().edge_paths());
        *self.syncer.borrow_mut() = Some(Box::new(sync));
    }

    // === Callback factories ===

    /// Returns a callback for pointer movement, in on-screen coordinates.
    pub fn pointer_moved_callback(&self) -> impl Fn(f32, f32) {
        let pending = self.pending.clone();
        move |x, y| {
            pending.borrow_mut().pointer = Point::new(x, y);
        }
    }

    /// Returns a callback for key events. Accepts every key it understands.
    pub fn key_pressed_callback(&self) -> impl Fn(SharedString) -> bool {
        let pending = self.pending.clone();
        move |text| {
            let Some(key) = Key::from_slint_text(&text) else {
                return false;
            };
            pending.borrow_mut().keys.push(key);
            true
        }
    }

    /// Returns a callback for the canvas scroll offset.
    pub fn scroll_callback(&self) -> impl Fn(f32, f32) {
        let session = self.session.clone();
        move |x, y| session.borrow_mut().set_scroll(Point::new(x, y))
    }

    pub fn primary_color_callback(&self) -> impl Fn(Color) {
        let session = self.session.clone();
        move |color| session.borrow_mut().set_primary_color(color)
    }

    pub fn secondary_color_callback(&self) -> impl Fn(Color) {
        let session = self.session.clone();
        move |color| session.borrow_mut().set_secondary_color(color)
    }

    // === Direct handlers ===

    /// Handle a click on a socket or intersection.
    pub fn handle_connector_clicked(&self, id: ElementId) {
        self.pending.borrow_mut().clicked_connector = Some(id);
    }

    /// Handle left-button press at `(x, y)` over `target`.
    pub fn handle_pointer_pressed(&self, target: Target, x: f32, y: f32) {
        let mut input = self.pending.borrow_mut();
        input.pointer = Point::new(x, y);
        input.active = target;
        input.left_pressed = true;
        input.left_down = true;
    }

    /// Handle left-button release at `(x, y)` over `target`.
    pub fn handle_pointer_released(&self, target: Target, x: f32, y: f32) {
        let mut input = self.pending.borrow_mut();
        input.pointer = Point::new(x, y);
        input.active = target;
        input.left_released = true;
        input.left_down = false;
    }

    /// Handle a right click at `(x, y)` over `target`.
    pub fn handle_right_click(&self, target: Target, x: f32, y: f32) {
        let mut input = self.pending.borrow_mut();
        input.pointer = Point::new(x, y);
        input.active = target;
        input.right_clicked = true;
    }

    pub fn set_ctrl(&self, held: bool) {
        self.pending.borrow_mut().ctrl = held;
    }

    /// Handle a toolkit drag of `id` to `(x, y)` relative to its parent.
    pub fn handle_element_moved(&self, id: ElementId, x: f32, y: f32) {
        self.pending.borrow_mut().moved.push((id, Point::new(x, y)));
    }

    /// Handle a toolkit resize of `id`.
    pub fn handle_element_resized(&self, id: ElementId, width: f32, height: f32) {
        self.pending
            .borrow_mut()
            .resized
            .push((id, Size::new(width, height)));
    }

    /// Handle a label's text being edited in place by the toolkit.
    pub fn handle_label_edited(&self, label: ElementId, text: SharedString) {
        if let Err(err) = self.session.borrow_mut().set_label_text(label, &text) {
            log::warn!("ignoring label edit: {err}");
        }
    }

    // === Frames ===

    /// Run one frame into the internal recorder and sync the bound model.
    pub fn frame(&self) {
        let mut recorder = self.recorder.borrow_mut();
        self.frame_with(&mut *recorder);
    }

    /// Run one frame into `renderer` and sync the bound model.
    pub fn frame_with<R: Renderer>(&self, renderer: &mut R) {
        let input = self.take_pending();
        let mut session = self.session.borrow_mut();
        session.run_frame(&input, renderer);
        if let Some(syncer) = self.syncer.borrow().as_ref() {
            syncer.sync(&session.edge_paths());
        }
    }

    /// False once the user asked to quit.
    pub fn is_running(&self) -> bool {
        self.session.borrow().is_running()
    }

    /// Take the pending input, carrying held state over to the next frame.
    fn take_pending(&self) -> FrameInput {
        let mut pending = self.pending.borrow_mut();
        let next = FrameInput {
            active: pending.active,
            left_down: pending.left_down,
            ctrl: pending.ctrl,
            ..FrameInput::at(pending.pointer)
        };
        std::mem::replace(&mut *pending, next)
    }
}
