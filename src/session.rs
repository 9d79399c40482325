//! The editor session: all mutable editor state in one place.
//!
//! [`EditorSession`] owns the canvas, the edge pool, the Focus / Selection /
//! Clipboard references and the drag mode. Every operation takes it by
//! `&mut self`, so there is no global state and no locking; the host drives it
//! from a single-threaded frame loop through [`EditorSession::run_frame`].

use crate::canvas::{Canvas, ElementId, ElementKind, IntersectionParts, NodeParts};
use crate::config::{fixed, EditorConfig, Palette};
use crate::edge_pool::{EdgeId, EdgePool};
use crate::error::EditorError;
use crate::geometry::{Point, Size};
use crate::input::FrameInput;
use crate::interaction::DragMode;
use crate::render::{draw_curve, EdgePath, Renderer};
use crate::routing::{route_edge, RoutedCurve};
use crate::selection::{References, TextSelection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slint::Color;

/// An edge routed for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedEdge {
    pub id: EdgeId,
    pub curve: RoutedCurve,
    pub color: Color,
}

pub struct EditorSession {
    pub(crate) config: EditorConfig,
    pub(crate) palette: Palette,
    pub(crate) canvas: Canvas,
    pub(crate) edges: EdgePool,
    pub(crate) refs: References,
    pub(crate) mode: DragMode,
    pub(crate) rng: StdRng,
    /// Last known pointer position, on screen
    pub(crate) pointer: Point,
    pub(crate) button_down: bool,
    pub(crate) running: bool,
    /// Routed geometry for the current frame; emptied at the start of each frame
    scratch: Vec<RoutedEdge>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            edges: EdgePool::with_capacity(config.edge_capacity),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            palette: Palette::default(),
            canvas: Canvas::new(),
            refs: References::new(),
            mode: DragMode::Idle,
            pointer: Point::default(),
            button_down: false,
            running: true,
            scratch: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn edges(&self) -> &EdgePool {
        &self.edges
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn focus(&self) -> Option<ElementId> {
        self.refs.focus()
    }

    pub fn selection(&self) -> Option<TextSelection> {
        self.refs.selection()
    }

    pub fn clipboard(&self) -> Option<ElementId> {
        self.refs.clipboard()
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// False once the user asked to quit (Escape with nothing to delete).
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    // === Toolkit-facing setters ===

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn set_primary_color(&mut self, color: Color) {
        self.palette.primary = color;
    }

    pub fn set_secondary_color(&mut self, color: Color) {
        self.palette.secondary = color;
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.canvas.set_scroll(scroll);
    }

    pub fn set_focus(&mut self, id: Option<ElementId>) -> Result<(), EditorError> {
        if let Some(id) = id {
            self.require(id)?;
        }
        self.refs.set_focus(id);
        Ok(())
    }

    /// Replace the label text of a node's label.
    pub fn set_label_text(&mut self, label: ElementId, text: &str) -> Result<(), EditorError> {
        self.canvas.set_text(label, text)
    }

    /// Set the selected character range of the label under edit.
    pub fn select_text_range(
        &mut self,
        label: ElementId,
        start: usize,
        end: usize,
    ) -> Result<(), EditorError> {
        self.require_kind(label, ElementKind::Label, "label")?;
        self.refs
            .set_selection(Some(TextSelection { label, start, end }));
        Ok(())
    }

    // === Creation ===

    /// Create a node with its top-left corner at canvas-space `position`.
    ///
    /// The node becomes Focus and its label becomes Selection.
    pub fn create_node(&mut self, position: Point) -> NodeParts {
        let parts = self.canvas.create_node(position, &self.config, &self.palette);
        self.refs.set_focus(Some(parts.node));
        self.refs.select_label(parts.label);
        parts
    }

    /// Create a node at a random spot of the spawn area near the scroll position.
    pub fn spawn_node(&mut self) -> NodeParts {
        let position = self.spawn_position();
        self.create_node(position)
    }

    /// Create a waypoint centered on canvas-space `center`.
    pub fn create_intersection(&mut self, center: Point) -> IntersectionParts {
        self.canvas.create_intersection(center, &self.config)
    }

    /// Commit an edge between two connectors using the secondary color.
    pub fn connect(&mut self, p0: ElementId, p1: ElementId) -> Result<EdgeId, EditorError> {
        self.require_connector(p0)?;
        self.require_connector(p1)?;
        self.edges.try_add(p0, p1, self.palette.secondary)
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Result<(), EditorError> {
        self.edges
            .remove(id)
            .map(|_| ())
            .ok_or(EditorError::UnknownEdge(id))
    }

    // === Moving and resizing ===

    /// Toolkit notification that `id` was dragged to `position` (relative to its parent).
    ///
    /// Moving a node selects its label; moving a group focuses it.
    pub fn move_element(&mut self, id: ElementId, position: Point) -> Result<(), EditorError> {
        self.canvas.set_position(id, position)?;
        self.focus_after_manipulation(id);
        Ok(())
    }

    /// Toolkit notification that `id` was resized.
    pub fn resize_element(&mut self, id: ElementId, size: Size) -> Result<(), EditorError> {
        self.canvas.set_size(id, size, &self.config)?;
        self.focus_after_manipulation(id);
        Ok(())
    }

    fn focus_after_manipulation(&mut self, id: ElementId) {
        match self.canvas.kind(id) {
            Some(ElementKind::Node) => {
                if let Some(label) = self.canvas.label_of(id) {
                    self.refs.select_label(label);
                }
                self.refs.set_focus(Some(id));
            }
            Some(ElementKind::Group) => {
                self.refs.clear_selection();
                self.refs.set_focus(Some(id));
            }
            _ => {}
        }
    }

    // === Frame loop ===

    /// Run one frame: apply the input snapshot, then route and draw.
    pub fn run_frame<R: Renderer>(&mut self, input: &FrameInput, renderer: &mut R) {
        self.scratch.clear();
        self.pointer = input.pointer;
        self.sync_focus_from_selection();

        for event in input.events() {
            self.handle(event);
        }
        self.button_down = input.left_down;

        self.route_all();
        self.draw(renderer);
    }

    /// The node whose label is under edit becomes Focus.
    ///
    /// Focus set this way wins over focus set by a click in an earlier frame
    /// as long as the label stays selected.
    pub(crate) fn sync_focus_from_selection(&mut self) {
        if let Some(label) = self.refs.selected_label() {
            let node = self.canvas.parent(label);
            if node.is_some() {
                self.refs.set_focus(node);
            }
        }
    }

    fn route_all(&mut self) {
        let mut scratch = std::mem::take(&mut self.scratch);
        self.route_into(&mut scratch);
        self.scratch = scratch;
    }

    fn route_into(&self, out: &mut Vec<RoutedEdge>) {
        let offset = self.config.control_offset;
        out.extend(self.edges.iter().filter_map(|(id, edge)| {
            Some(RoutedEdge {
                id,
                curve: route_edge(&self.canvas, edge, offset)?,
                color: edge.color,
            })
        }));
    }

    fn draw<R: Renderer>(&self, renderer: &mut R) {
        let width = self.config.line_width;
        renderer.clear();
        for routed in &self.scratch {
            draw_curve(renderer, &routed.curve, width, routed.color);
        }

        match self.mode {
            DragMode::LineDrawing { anchor } if !self.button_down => {
                if let Some(from) = self.canvas.midpoint(anchor) {
                    renderer.draw_line(from, self.pointer, width, self.palette.secondary);
                }
            }
            DragMode::RectDrawing { origin } if self.button_down => {
                let corner = origin - self.canvas.scroll();
                renderer.draw_rect_outline(corner, self.pointer, width, fixed::selection_rect());
            }
            _ => {}
        }
        renderer.present();
    }

    /// Route every live edge against current positions.
    pub fn routed_edges(&self) -> Vec<RoutedEdge> {
        let mut out = Vec::with_capacity(self.edges.len());
        self.route_into(&mut out);
        out
    }

    /// Routed edges as path commands, for a `Path` based renderer.
    pub fn edge_paths(&self) -> Vec<EdgePath> {
        self.routed_edges()
            .into_iter()
            .map(|routed| EdgePath {
                id: routed.id,
                commands: routed.curve.to_path_commands(),
                color: routed.color,
                width: self.config.line_width,
            })
            .collect()
    }

    // === Invariants ===

    /// Check that no edge, reference or drag anchor points at a destroyed element.
    pub fn validate(&self) -> Result<(), EditorError> {
        for (_, edge) in self.edges.iter() {
            self.require_connector(edge.p0)?;
            self.require_connector(edge.p1)?;
        }
        for id in self.refs.iter() {
            self.require(id)?;
        }
        if let DragMode::LineDrawing { anchor } = self.mode {
            self.require_connector(anchor)?;
        }
        Ok(())
    }

    // === Helpers ===

    pub(crate) fn spawn_position(&mut self) -> Point {
        let area = self.config.spawn_area;
        let x = if area.width > 0.0 {
            self.rng.random_range(0.0..area.width).floor()
        } else {
            0.0
        };
        let y = if area.height > 0.0 {
            self.rng.random_range(0.0..area.height).floor()
        } else {
            0.0
        };
        self.canvas.scroll() + Point::new(x, y)
    }

    pub(crate) fn require(&self, id: ElementId) -> Result<ElementKind, EditorError> {
        self.canvas.kind(id).ok_or(EditorError::UnknownElement(id))
    }

    pub(crate) fn require_kind(
        &self,
        id: ElementId,
        kind: ElementKind,
        expected: &'static str,
    ) -> Result<(), EditorError> {
        let found = self.require(id)?;
        if found == kind {
            Ok(())
        } else {
            Err(EditorError::WrongKind {
                id,
                expected,
                found,
            })
        }
    }

    pub(crate) fn require_connector(&self, id: ElementId) -> Result<(), EditorError> {
        let found = self.require(id)?;
        if found.is_connector() {
            Ok(())
        } else {
            Err(EditorError::WrongKind {
                id,
                expected: "socket or intersection",
                found,
            })
        }
    }
}
