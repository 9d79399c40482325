//! # Slint Graph Canvas
//!
//! The editing core of an interactive node-graph editor: nodes with editable
//! labels and four sockets, free-standing intersections, groups formed by
//! spatial containment, and curved edges whose shape follows the side of the
//! node they attach to.
//!
//! ## Features
//!
//! - **Arena element tree** - Generation-checked [`ElementId`] handles; stale handles never alias
//! - **Fixed-capacity edge pool** - O(1) add/remove, insertion-ordered iteration
//! - **Explicit drag state machine** - [`DragMode`] driven by one transition function
//! - **Cascade deletion** - No edge or reference ever outlives its endpoint
//! - **Pure curve routing** - Geometry re-derived every frame from current positions
//!
//! ## Quick Start
//!
//! ```
//! use slint_graph_canvas::{CommandRecorder, Direction, EditorSession, InputEvent, Point};
//!
//! let mut session = EditorSession::default();
//! let a = session.create_node(Point::new(0.0, 0.0));
//! let b = session.create_node(Point::new(300.0, 0.0));
//!
//! session.handle(InputEvent::ConnectorClicked(a.socket(Direction::Right)));
//! session.handle(InputEvent::ConnectorClicked(b.socket(Direction::Left)));
//! assert_eq!(session.edges().len(), 1);
//!
//! let mut recorder = CommandRecorder::new();
//! session.run_frame(&Default::default(), &mut recorder);
//! assert_eq!(recorder.commands().len(), 1);
//! ```
//!
//! ## Rust Helpers
//!
//! - [`EditorController`] - Shares a session across Slint callbacks
//! - [`route`] - Control points for a pair of anchors
//! - [`elements_within`] - Containment test used by grouping
//! - [`PathModelSync`] - Keeps a Slint `VecModel` of edge paths up to date

pub mod canvas;
pub mod config;
pub mod controller;
pub mod deletion;
pub mod edge_pool;
pub mod error;
pub mod geometry;
pub mod grouping;
pub mod input;
pub mod interaction;
pub mod render;
pub mod routing;
pub mod selection;
pub mod session;

pub use canvas::{
    Canvas, Direction, Element, ElementFlags, ElementId, ElementKind, IntersectionParts,
    NodeParts,
};
pub use config::{EditorConfig, Palette};
pub use controller::EditorController;
pub use edge_pool::{Edge, EdgeId, EdgePool};
pub use error::EditorError;
pub use geometry::{Point, Rect, Size};
pub use grouping::{contained_in, elements_within};
pub use input::{FrameInput, Key};
pub use interaction::{DragMode, InputEvent, Target};
pub use render::{draw_curve, CommandRecorder, DrawCommand, EdgePath, PathModelSync, Renderer};
pub use routing::{route, route_edge, Anchor, Orientation, RoutedCurve};
pub use selection::{References, TextSelection};
pub use session::{EditorSession, RoutedEdge};
