//! Focus, Selection and Clipboard, and the copy/paste operations built on them.

use crate::canvas::{ElementId, ElementKind};
use crate::geometry::Point;
use crate::session::EditorSession;

/// Text-edit selection: the label being edited and the selected character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSelection {
    pub label: ElementId,
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn caret(label: ElementId) -> Self {
        Self {
            label,
            start: 0,
            end: 0,
        }
    }

    /// True if more than a caret is selected.
    pub fn has_range(&self) -> bool {
        self.start != self.end
    }
}

/// The element references the editor keeps between frames.
///
/// Every reference is a weak handle: when its referent is destroyed it must
/// be cleared via [`forget`](Self::forget) in the same operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct References {
    focus: Option<ElementId>,
    selection: Option<TextSelection>,
    clipboard: Option<ElementId>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element targeted by delete and paste
    pub fn focus(&self) -> Option<ElementId> {
        self.focus
    }

    pub fn set_focus(&mut self, id: Option<ElementId>) {
        self.focus = id;
    }

    /// Label currently under text edit
    pub fn selection(&self) -> Option<TextSelection> {
        self.selection
    }

    pub fn selected_label(&self) -> Option<ElementId> {
        self.selection.map(|s| s.label)
    }

    pub fn select_label(&mut self, label: ElementId) {
        self.selection = Some(TextSelection::caret(label));
    }

    pub fn set_selection(&mut self, selection: Option<TextSelection>) {
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Last copied element
    pub fn clipboard(&self) -> Option<ElementId> {
        self.clipboard
    }

    pub fn set_clipboard(&mut self, id: Option<ElementId>) {
        self.clipboard = id;
    }

    /// Clear every reference for which `destroyed` returns true.
    pub fn forget<F>(&mut self, destroyed: F)
    where
        F: Fn(ElementId) -> bool,
    {
        if self.focus.is_some_and(&destroyed) {
            self.focus = None;
        }
        if self.selection.is_some_and(|s| destroyed(s.label)) {
            self.selection = None;
        }
        if self.clipboard.is_some_and(&destroyed) {
            self.clipboard = None;
        }
    }

    /// Drop all references.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every element currently referenced, for invariant checks.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.focus
            .into_iter()
            .chain(self.selection.map(|s| s.label))
            .chain(self.clipboard)
    }
}

impl EditorSession {
    /// Copy Focus to the Clipboard, unless a text range is selected.
    ///
    /// Parts of a node or an intersection copy the whole unit.
    pub fn copy(&mut self) {
        if self.refs.selection().is_some_and(|s| s.has_range()) {
            return;
        }
        let Some(focus) = self.refs.focus() else {
            return;
        };
        let unit = match self.canvas.kind(focus) {
            Some(ElementKind::Label | ElementKind::Socket(_)) => {
                self.canvas.enclosing(focus, ElementKind::Node)
            }
            Some(ElementKind::Intersection) => self.canvas.parent(focus),
            Some(_) => Some(focus),
            None => None,
        };
        log::debug!("copied {unit:?}");
        self.refs.set_clipboard(unit);
    }

    /// Clone the Clipboard element onto the canvas, offset from the original.
    ///
    /// Focus and Clipboard move to the clone; a pasted node's label becomes
    /// Selection. Edges are not copied.
    pub fn paste(&mut self) -> Option<ElementId> {
        let source = self.refs.clipboard()?;
        let offset = self.config.paste_offset;
        let position = self.canvas.canvas_position(source)? + Point::new(offset, offset);
        let clone = match self.canvas.clone_subtree(source, position) {
            Ok(clone) => clone,
            Err(err) => {
                log::warn!("paste failed: {err}");
                return None;
            }
        };
        log::debug!("pasted {source:?} as {clone:?}");

        self.refs.set_focus(Some(clone));
        self.refs.set_clipboard(Some(clone));
        if let Some(label) = self.canvas.label_of(clone) {
            self.refs.select_label(label);
        }
        Some(clone)
    }
}
