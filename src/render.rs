//! Renderer seam and Slint model sync.
//!
//! The editor core never rasterizes anything. Each frame it hands endpoint and
//! control-point geometry to a [`Renderer`], or exports routed edges as path
//! commands for a Slint `Path` element through [`PathModelSync`].

use crate::edge_pool::EdgeId;
use crate::geometry::Point;
use crate::routing::RoutedCurve;
use slint::{Color, Model, ModelRc, SharedString, VecModel};
use std::rc::Rc;

/// Draw calls the editor issues once per frame.
pub trait Renderer {
    /// Start of frame.
    fn clear(&mut self) {}

    fn draw_line(&mut self, p0: Point, p1: Point, width: f32, color: Color);

    fn draw_quadratic(&mut self, p0: Point, control: Point, p1: Point, width: f32, color: Color);

    fn draw_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, width: f32, color: Color);

    /// Outline of the rectangle spanned by two opposite corners.
    fn draw_rect_outline(&mut self, a: Point, b: Point, width: f32, color: Color);

    /// End of frame (swap buffers).
    fn present(&mut self) {}
}

/// Issue the draw call matching the shape of `curve`.
pub fn draw_curve<R: Renderer + ?Sized>(
    renderer: &mut R,
    curve: &RoutedCurve,
    width: f32,
    color: Color,
) {
    match *curve {
        RoutedCurve::Line { p0, p3 } => renderer.draw_line(p0, p3, width, color),
        RoutedCurve::Quadratic { p0, control, p3 } => {
            renderer.draw_quadratic(p0, control, p3, width, color)
        }
        RoutedCurve::Cubic { p0, p1, p2, p3 } => renderer.draw_cubic(p0, p1, p2, p3, width, color),
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line {
        p0: Point,
        p1: Point,
        width: f32,
        color: Color,
    },
    Quadratic {
        p0: Point,
        control: Point,
        p1: Point,
        width: f32,
        color: Color,
    },
    Cubic {
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
        width: f32,
        color: Color,
    },
    RectOutline {
        a: Point,
        b: Point,
        width: f32,
        color: Color,
    },
}

/// Renderer that keeps the draw calls of the last frame.
///
/// Useful for headless hosts and for tests.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn curves(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::RectOutline { .. }))
    }
}

impl Renderer for CommandRecorder {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_line(&mut self, p0: Point, p1: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { p0, p1, width, color });
    }

    fn draw_quadratic(&mut self, p0: Point, control: Point, p1: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Quadratic {
            p0,
            control,
            p1,
            width,
            color,
        });
    }

    fn draw_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::Cubic {
            p0,
            p1,
            p2,
            p3,
            width,
            color,
        });
    }

    fn draw_rect_outline(&mut self, a: Point, b: Point, width: f32, color: Color) {
        self.commands.push(DrawCommand::RectOutline { a, b, width, color });
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

/// A routed edge as SVG path commands.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub id: EdgeId,
    pub commands: String,
    pub color: Color,
    pub width: f32,
}

/// Object-safe sync target, so a controller can hold any row type.
pub(crate) trait ModelSyncer {
    fn sync(&self, paths: &[EdgePath]);
}

/// Keeps a Slint `VecModel` in step with a list of edge paths.
///
/// `constructor` builds the row type from (edge index, path commands, color,
/// line width). Rows are updated in place; surplus rows are removed.
pub struct PathModelSync<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> PathModelSync<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, SharedString, Color, f32) -> P,
{
    pub fn new(model: Rc<VecModel<P>>, constructor: F) -> Self {
        Self { model, constructor }
    }

    pub fn model(&self) -> ModelRc<P> {
        ModelRc::from(self.model.clone())
    }

    pub fn sync(&self, paths: &[EdgePath]) {
        for (row, path) in paths.iter().enumerate() {
            let item = (self.constructor)(
                path.id.index() as i32,
                SharedString::from(path.commands.as_str()),
                path.color,
                path.width,
            );
            if row < self.model.row_count() {
                self.model.set_row_data(row, item);
            } else {
                self.model.push(item);
            }
        }
        while self.model.row_count() > paths.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

impl<P, F> ModelSyncer for PathModelSync<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, SharedString, Color, f32) -> P,
{
    fn sync(&self, paths: &[EdgePath]) {
        PathModelSync::sync(self, paths);
    }
}
