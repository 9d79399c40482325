//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_graph_canvas::{EditorSession, ElementId, ElementKind};

/// Install `env_logger` once per test binary; repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Top-level elements of the given kind, in creation order.
pub fn roots_of_kind(session: &EditorSession, kind: ElementKind) -> Vec<ElementId> {
    session
        .canvas()
        .roots()
        .iter()
        .copied()
        .filter(|&id| session.canvas().kind(id) == Some(kind))
        .collect()
}

/// Assert that no edge, reference or drag anchor dangles.
pub fn assert_consistent(session: &EditorSession) {
    if let Err(err) = session.validate() {
        panic!("session invariant violated: {err}");
    }
}
