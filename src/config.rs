//! Editor configuration and the current color palette.

use crate::geometry::{Point, Size};
use slint::Color;

/// Tunable constants of the editor.
///
/// Marked `#[non_exhaustive]` so new settings can be added without breaking
/// callers; construct with [`EditorConfig::default`] and the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct EditorConfig {
    /// Number of edge slots allocated up front (default: 1024).
    pub edge_capacity: usize,
    /// Distance of a curve control point from its socket (default: 48.0).
    pub control_offset: f32,
    /// Minimum displacement on both axes for a drag to become a group (default: 4.0).
    pub drag_threshold: f32,
    /// Offset applied to pasted elements on both axes (default: 12.0).
    pub paste_offset: f32,
    /// Size of a freshly created node (default: 120x60).
    pub node_min_size: Size,
    /// Size of a node's label box (default: 36x36).
    pub label_min_size: Size,
    /// Edge length of the square socket hit target (default: 12.0).
    pub socket_size: f32,
    /// Edge length of an intersection's container (default: 16.0).
    pub intersection_size: f32,
    /// Inset of the connector inside its intersection container (default: 2.0).
    pub intersection_inset: f32,
    /// Gap between a selected node and a node spawned below it with Enter (default: 36.0).
    pub new_node_gap: f32,
    /// Area, relative to the scroll position, where unplaced nodes spawn (default: 1000x400).
    pub spawn_area: Size,
    /// Seed for spawn positions (default: 1234).
    pub seed: u64,
    /// Stroke width handed to the renderer for edges and previews (default: 3.0).
    pub line_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edge_capacity: 1024,
            control_offset: 48.0,
            drag_threshold: 4.0,
            paste_offset: 12.0,
            node_min_size: Size::new(120.0, 60.0),
            label_min_size: Size::new(36.0, 36.0),
            socket_size: 12.0,
            intersection_size: 16.0,
            intersection_inset: 2.0,
            new_node_gap: 36.0,
            spawn_area: Size::new(1000.0, 400.0),
            seed: 1234,
            line_width: 3.0,
        }
    }
}

impl EditorConfig {
    pub fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    pub fn with_control_offset(mut self, offset: f32) -> Self {
        self.control_offset = offset;
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_paste_offset(mut self, offset: f32) -> Self {
        self.paste_offset = offset;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Top-left of a node centered on `center`.
    pub fn node_origin_centered_on(&self, center: Point) -> Point {
        Point::new(
            center.x - self.node_min_size.width / 2.0,
            center.y - self.node_min_size.height / 2.0,
        )
    }
}

/// Colors picked by the user; the picker widgets themselves live in the toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Node and group fill
    pub primary: Color,
    /// Edges, borders and label text
    pub secondary: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb_u8(64, 64, 64),
            secondary: Color::from_rgb_u8(255, 255, 255),
        }
    }
}

/// Fixed colors for elements that do not follow the palette.
pub(crate) mod fixed {
    use slint::Color;

    pub fn intersection_fill() -> Color {
        Color::from_rgb_u8(255, 255, 255)
    }

    pub fn connector_fill() -> Color {
        Color::from_rgb_u8(0, 120, 255)
    }

    pub fn selection_rect() -> Color {
        Color::from_rgb_u8(255, 255, 255)
    }
}
