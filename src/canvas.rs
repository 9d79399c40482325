//! Element tree of the editor canvas.
//!
//! Every addressable box (nodes, their labels and sockets, intersections and
//! groups) lives in one generation-checked arena and is addressed by an
//! [`ElementId`]. Ownership is explicit: each element records its parent and
//! its ordered children, and elements without a parent are direct children of
//! the scrolling canvas surface.
//!
//! Positions are stored relative to the parent. For direct canvas children
//! the position is in canvas space; on-screen coordinates subtract the scroll
//! offset:
//!
//! ```text
//! canvas_pos(e) = pos(e) + canvas_pos(parent(e))
//! screen_pos(e) = canvas_pos(e) - scroll
//! ```

use crate::config::{fixed, EditorConfig, Palette};
use crate::error::EditorError;
use crate::geometry::{Point, Rect, Size};
use slint::Color;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a canvas element. Stale handles never alias new elements.
    pub struct ElementId;
}

/// Side of a node a socket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector pointing away from the node, in canvas space (y down).
    pub fn normal(self) -> Point {
        match self {
            Direction::Left => Point::new(-1.0, 0.0),
            Direction::Right => Point::new(1.0, 0.0),
            Direction::Up => Point::new(0.0, -1.0),
            Direction::Down => Point::new(0.0, 1.0),
        }
    }
}

/// What an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    /// Editable text child of a node
    Label,
    Socket(Direction),
    /// Plain box holding an intersection connector
    Container,
    /// Clickable connection point of a free-standing waypoint
    Intersection,
    Group,
}

impl ElementKind {
    /// Sockets and intersections can be the endpoint of an edge.
    pub fn is_connector(self) -> bool {
        matches!(self, ElementKind::Socket(_) | ElementKind::Intersection)
    }
}

/// Behavior flags honored by the widget toolkit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFlags {
    pub clickable: bool,
    pub movable: bool,
    pub resizable: bool,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    /// Position relative to the parent (canvas space for top-level elements)
    pub position: Point,
    pub size: Size,
    pub flags: ElementFlags,
    pub text: String,
    pub background: Color,
    pub border: Color,
}

impl Element {
    fn new(kind: ElementKind, position: Point, size: Size) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            position,
            size,
            flags: ElementFlags::default(),
            text: String::new(),
            background: Color::default(),
            border: Color::default(),
        }
    }
}

/// Handles of a freshly created node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeParts {
    pub node: ElementId,
    pub label: ElementId,
    /// In [`Direction::ALL`] order
    pub sockets: [ElementId; 4],
}

impl NodeParts {
    pub fn socket(&self, direction: Direction) -> ElementId {
        match direction {
            Direction::Left => self.sockets[0],
            Direction::Right => self.sockets[1],
            Direction::Up => self.sockets[2],
            Direction::Down => self.sockets[3],
        }
    }
}

/// Handles of a freshly created intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionParts {
    pub container: ElementId,
    pub connector: ElementId,
}

/// Offset of a socket relative to its node's top-left corner.
pub fn socket_offset(direction: Direction, node: Size, socket_size: f32) -> Point {
    let half = socket_size / 2.0;
    match direction {
        Direction::Left => Point::new(-half, node.height / 2.0 - half),
        Direction::Right => Point::new(node.width - half, node.height / 2.0 - half),
        Direction::Up => Point::new(node.width / 2.0 - half, -half),
        Direction::Down => Point::new(node.width / 2.0 - half, node.height - half),
    }
}

/// Arena of canvas elements plus the scroll state of the canvas surface.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    elements: SlotMap<ElementId, Element>,
    roots: Vec<ElementId>,
    scroll: Point,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.elements.get(id).map(|e| e.kind)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Direct children of the canvas surface, in creation order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    /// Convert an on-screen point to canvas space.
    pub fn to_canvas(&self, screen: Point) -> Point {
        screen + self.scroll
    }

    // === Creation ===

    /// Create a node with a centered label and four sockets.
    ///
    /// `position` is the node's top-left corner in canvas space.
    pub fn create_node(
        &mut self,
        position: Point,
        config: &EditorConfig,
        palette: &Palette,
    ) -> NodeParts {
        let size = config.node_min_size;
        let mut node = Element::new(ElementKind::Node, position, size);
        node.flags = ElementFlags {
            clickable: false,
            movable: true,
            resizable: true,
            editable: false,
        };
        node.background = palette.primary;
        node.border = palette.secondary;
        let node_id = self.insert(node, None);

        let label_size = config.label_min_size;
        let mut label = Element::new(
            ElementKind::Label,
            Point::new(
                (size.width - label_size.width) / 2.0,
                (size.height - label_size.height) / 2.0,
            ),
            label_size,
        );
        label.flags.editable = true;
        label.border = palette.secondary;
        let label_id = self.insert(label, Some(node_id));

        let sockets = Direction::ALL.map(|direction| {
            let mut socket = Element::new(
                ElementKind::Socket(direction),
                socket_offset(direction, size, config.socket_size),
                Size::new(config.socket_size, config.socket_size),
            );
            socket.flags.clickable = true;
            self.insert(socket, Some(node_id))
        });

        log::debug!("created node {node_id:?} at ({}, {})", position.x, position.y);
        NodeParts {
            node: node_id,
            label: label_id,
            sockets,
        }
    }

    /// Create a free-standing waypoint whose container is centered on `center`.
    pub fn create_intersection(
        &mut self,
        center: Point,
        config: &EditorConfig,
    ) -> IntersectionParts {
        let outer = config.intersection_size;
        let mut container = Element::new(
            ElementKind::Container,
            Point::new(center.x - outer / 2.0, center.y - outer / 2.0),
            Size::new(outer, outer),
        );
        container.flags.movable = true;
        container.background = fixed::intersection_fill();
        let container_id = self.insert(container, None);

        let inner = outer - 2.0 * config.intersection_inset;
        let mut connector = Element::new(
            ElementKind::Intersection,
            Point::new(config.intersection_inset, config.intersection_inset),
            Size::new(inner, inner),
        );
        connector.flags.clickable = true;
        connector.flags.movable = true;
        connector.background = fixed::connector_fill();
        let connector_id = self.insert(connector, Some(container_id));

        log::debug!("created intersection {connector_id:?}");
        IntersectionParts {
            container: container_id,
            connector: connector_id,
        }
    }

    /// Create an empty group shell covering `bounds` (canvas space).
    pub fn create_group(&mut self, bounds: Rect, palette: &Palette) -> ElementId {
        let mut group = Element::new(ElementKind::Group, bounds.origin(), bounds.size());
        group.flags.movable = true;
        group.flags.resizable = true;
        group.background = palette.primary;
        group.border = palette.secondary;
        self.insert(group, None)
    }

    fn insert(&mut self, mut element: Element, parent: Option<ElementId>) -> ElementId {
        element.parent = parent;
        let id = self.elements.insert(element);
        self.attach(id, parent);
        id
    }

    fn attach(&mut self, id: ElementId, parent: Option<ElementId>) {
        match parent.and_then(|p| self.elements.get_mut(p)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
    }

    fn detach(&mut self, id: ElementId) {
        let parent = self.parent(id);
        let siblings = match parent.and_then(|p| self.elements.get_mut(p)) {
            Some(p) => &mut p.children,
            None => &mut self.roots,
        };
        siblings.retain(|&child| child != id);
    }

    // === Queries ===

    /// Position of `id` in canvas space.
    pub fn canvas_position(&self, id: ElementId) -> Option<Point> {
        let mut element = self.elements.get(id)?;
        let mut position = element.position;
        while let Some(parent) = element.parent {
            element = self.elements.get(parent)?;
            position = position + element.position;
        }
        Some(position)
    }

    /// Bounding box of `id` in canvas space.
    pub fn canvas_bounds(&self, id: ElementId) -> Option<Rect> {
        let size = self.elements.get(id)?.size;
        Some(Rect::from_origin_size(self.canvas_position(id)?, size))
    }

    /// On-screen top-left corner of `id`.
    pub fn absolute_position(&self, id: ElementId) -> Option<Point> {
        Some(self.canvas_position(id)? - self.scroll)
    }

    /// On-screen bounding box of `id`.
    pub fn absolute_bounds(&self, id: ElementId) -> Option<Rect> {
        Some(self.canvas_bounds(id)?.translated(Point::default() - self.scroll))
    }

    /// On-screen midpoint of `id`, used as the attachment point of edges.
    pub fn midpoint(&self, id: ElementId) -> Option<Point> {
        self.absolute_bounds(id).map(|b| b.center())
    }

    /// True if `ancestor` is `id` itself or any element above it.
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Nearest enclosing element of the given kind, including `id` itself.
    pub fn enclosing(&self, id: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.kind(current)? == kind {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// The label child of a node.
    pub fn label_of(&self, node: ElementId) -> Option<ElementId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == Some(ElementKind::Label))
    }

    /// The socket of a node on the given side.
    pub fn socket_of(&self, node: ElementId, direction: Direction) -> Option<ElementId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == Some(ElementKind::Socket(direction)))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    /// All elements in the subtree rooted at `id`, `id` first.
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.get(current) {
                out.push(current);
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    // === Mutation ===

    /// Move `id` so its position relative to its parent is `position`.
    pub fn set_position(&mut self, id: ElementId, position: Point) -> Result<(), EditorError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(EditorError::UnknownElement(id))?;
        element.position = position;
        Ok(())
    }

    /// Resize `id`. Nodes re-center their label and re-lay out their sockets.
    pub fn set_size(
        &mut self,
        id: ElementId,
        size: Size,
        config: &EditorConfig,
    ) -> Result<(), EditorError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(EditorError::UnknownElement(id))?;
        element.size = size;
        if element.kind != ElementKind::Node {
            return Ok(());
        }

        for child in element.children.clone() {
            let Some(child) = self.elements.get_mut(child) else {
                continue;
            };
            match child.kind {
                ElementKind::Socket(direction) => {
                    child.position = socket_offset(direction, size, config.socket_size);
                }
                ElementKind::Label => {
                    child.position = Point::new(
                        (size.width - child.size.width) / 2.0,
                        (size.height - child.size.height) / 2.0,
                    );
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), EditorError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(EditorError::UnknownElement(id))?;
        if !element.flags.editable {
            return Err(EditorError::WrongKind {
                id,
                expected: "editable label",
                found: element.kind,
            });
        }
        element.text.clear();
        element.text.push_str(text);
        Ok(())
    }

    pub(crate) fn text_mut(&mut self, id: ElementId) -> Option<&mut String> {
        self.elements
            .get_mut(id)
            .filter(|e| e.flags.editable)
            .map(|e| &mut e.text)
    }

    /// Move `id` under `new_parent` (or the canvas when `None`), keeping its
    /// on-screen position unchanged.
    pub fn reparent(
        &mut self,
        id: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), EditorError> {
        let canvas_pos = self
            .canvas_position(id)
            .ok_or(EditorError::UnknownElement(id))?;
        let parent_pos = match new_parent {
            Some(p) => self
                .canvas_position(p)
                .ok_or(EditorError::UnknownElement(p))?,
            None => Point::default(),
        };

        self.detach(id);
        if let Some(element) = self.elements.get_mut(id) {
            element.parent = new_parent;
            element.position = canvas_pos - parent_pos;
        }
        self.attach(id, new_parent);
        Ok(())
    }

    /// Destroy `id` and everything it owns. Returns the removed handles.
    pub fn destroy(&mut self, id: ElementId) -> Vec<ElementId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.detach(id);
        let removed = self.subtree(id);
        for &element in &removed {
            self.elements.remove(element);
        }
        log::debug!("destroyed {id:?} ({} elements)", removed.len());
        removed
    }

    /// Destroy every element on the canvas.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.roots.clear();
    }

    /// Deep-copy the subtree at `id` onto the canvas at canvas-space `position`.
    pub fn clone_subtree(
        &mut self,
        id: ElementId,
        position: Point,
    ) -> Result<ElementId, EditorError> {
        if !self.contains(id) {
            return Err(EditorError::UnknownElement(id));
        }
        let root = self.clone_into(id, None);
        if let Some(element) = self.elements.get_mut(root) {
            element.position = position;
        }
        Ok(root)
    }

    fn clone_into(&mut self, source: ElementId, parent: Option<ElementId>) -> ElementId {
        let mut copy = self.elements[source].clone();
        let children = std::mem::take(&mut copy.children);
        let id = self.insert(copy, parent);
        for child in children {
            self.clone_into(child, Some(id));
        }
        id
    }
}
