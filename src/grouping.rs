//! Grouping by spatial containment.

use crate::canvas::{Canvas, ElementId, ElementKind};
use crate::error::EditorError;
use crate::geometry::Rect;
use crate::session::EditorSession;

/// Ids of the candidates whose bounds lie entirely within `bounds`.
///
/// Containment is inclusive on every side; partial overlap never matches.
pub fn contained_in<I>(bounds: Rect, candidates: I) -> Vec<ElementId>
where
    I: IntoIterator<Item = (ElementId, Rect)>,
{
    candidates
        .into_iter()
        .filter(|(_, rect)| bounds.contains_rect(rect))
        .map(|(id, _)| id)
        .collect()
}

/// Direct canvas children fully inside `bounds` (canvas space).
pub fn elements_within(canvas: &Canvas, bounds: Rect) -> Vec<ElementId> {
    contained_in(
        bounds,
        canvas
            .roots()
            .iter()
            .filter_map(|&id| Some((id, canvas.canvas_bounds(id)?))),
    )
}

impl EditorSession {
    /// Create a Group covering `bounds` (canvas space) and absorb every
    /// top-level element fully inside it. The Group becomes Focus.
    pub fn group_rect(&mut self, bounds: Rect) -> ElementId {
        let members = elements_within(&self.canvas, bounds);
        let group = self.canvas.create_group(bounds, &self.palette);

        for &member in &members {
            if let Err(err) = self.canvas.reparent(member, Some(group)) {
                log::warn!("could not move {member:?} into group: {err}");
            }
        }
        log::debug!("created group {group:?} with {} members", members.len());

        self.refs.set_focus(Some(group));
        self.refs.clear_selection();
        group
    }

    /// Move every child of `group` back onto the canvas and destroy the
    /// empty shell. Children and their edges survive.
    pub fn dissolve_group(&mut self, group: ElementId) -> Result<(), EditorError> {
        self.require_kind(group, ElementKind::Group, "group")?;

        let children = self.canvas.children(group).to_vec();
        for &child in &children {
            self.canvas.reparent(child, None)?;
        }
        log::debug!("dissolved group {group:?} ({} children)", children.len());

        self.destroy_element(group);
        Ok(())
    }
}
