//! Deletion and cascade.
//!
//! Every destructive operation funnels through one pass that removes the
//! edges attached anywhere in the doomed subtree, destroys the subtree and
//! then drops every reference (Focus, Selection, Clipboard, line anchor) that
//! pointed into it.

use crate::canvas::{ElementId, ElementKind};
use crate::error::EditorError;
use crate::interaction::DragMode;
use crate::session::EditorSession;

impl EditorSession {
    /// Delete a Node together with its label, its sockets and every edge
    /// attached to one of them.
    pub fn delete_node(&mut self, node: ElementId) -> Result<(), EditorError> {
        self.require_kind(node, ElementKind::Node, "node")?;
        self.destroy_element(node);
        Ok(())
    }

    /// Delete an intersection, given either its connector or its container.
    pub fn delete_intersection(&mut self, id: ElementId) -> Result<(), EditorError> {
        let container = match self.require(id)? {
            ElementKind::Container => id,
            ElementKind::Intersection => self
                .canvas
                .parent(id)
                .ok_or(EditorError::UnknownElement(id))?,
            found => {
                return Err(EditorError::WrongKind {
                    id,
                    expected: "intersection",
                    found,
                })
            }
        };
        self.destroy_element(container);
        Ok(())
    }

    /// Delete whatever Focus points at: a Group is dissolved, a Node (or a
    /// part of one) is cascade-deleted, an intersection is removed.
    pub fn delete_focused(&mut self) {
        let Some(focus) = self.refs.focus() else {
            return;
        };
        let result = match self.canvas.kind(focus) {
            Some(ElementKind::Group) => self.dissolve_group(focus),
            Some(ElementKind::Node | ElementKind::Label | ElementKind::Socket(_)) => {
                match self.canvas.enclosing(focus, ElementKind::Node) {
                    Some(node) => self.delete_node(node),
                    None => Ok(()),
                }
            }
            Some(ElementKind::Container | ElementKind::Intersection) => {
                self.delete_intersection(focus)
            }
            None => Ok(()),
        };
        if let Err(err) = result {
            log::warn!("delete of focused {focus:?} failed: {err}");
        }
    }

    /// Destroy every element and every edge and reset all references.
    pub fn clear_all(&mut self) {
        log::debug!(
            "clearing {} elements and {} edges",
            self.canvas.len(),
            self.edges.len()
        );
        self.edges.clear();
        self.canvas.clear();
        self.refs.clear();
        self.mode = DragMode::Idle;
    }

    /// Remove the subtree at `id` and everything that refers into it.
    pub(crate) fn destroy_element(&mut self, id: ElementId) {
        let canvas = &self.canvas;
        let dropped = self.edges.remove_touching(|end| canvas.is_within(end, id));
        let removed = self.canvas.destroy(id);
        log::debug!(
            "destroyed {id:?}: {} elements, {dropped} edges",
            removed.len()
        );

        let canvas = &self.canvas;
        self.refs.forget(|element| !canvas.contains(element));
        if let DragMode::LineDrawing { anchor } = self.mode {
            if !self.canvas.contains(anchor) {
                self.mode = DragMode::Idle;
            }
        }
    }
}
