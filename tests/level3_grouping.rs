//! Level 3: Grouping Tests
//!
//! Tests rectangle drawing, containment-exact grouping, and group dissolution.

mod common;

use common::harness::EditorHarness;
use slint_graph_canvas::{DragMode, DrawCommand, EditorConfig, ElementKind, Point, Rect, Target};

// ============================================================================
// Rectangle drawing
// ============================================================================

#[test]
fn test_rectangle_preview_while_dragging() {
    let harness = EditorHarness::new();
    harness.press(Target::Canvas, 10.0, 20.0);
    harness.move_pointer(200.0, 150.0);

    assert_eq!(
        harness.commands(),
        vec![DrawCommand::RectOutline {
            a: Point::new(10.0, 20.0),
            b: Point::new(200.0, 150.0),
            width: 3.0,
            color: slint::Color::from_rgb_u8(255, 255, 255),
        }]
    );
    assert!(matches!(
        harness.with_session(|s| s.mode()),
        DragMode::RectDrawing { .. }
    ));
}

#[test]
fn test_click_on_canvas_creates_node_centered_on_pointer() {
    let harness = EditorHarness::new();
    harness.click_canvas(300.0, 200.0);

    harness.with_session(|s| {
        let nodes = common::roots_of_kind(s, ElementKind::Node);
        assert_eq!(nodes.len(), 1);
        let bounds = s.canvas().canvas_bounds(nodes[0]).unwrap();
        assert_eq!(bounds.center(), Point::new(300.0, 200.0));
        assert_eq!(s.focus(), Some(nodes[0]));
        assert_eq!(s.mode(), DragMode::Idle);
    });
}

#[test]
fn test_small_drag_counts_as_click() {
    let harness = EditorHarness::new();
    harness.drag_canvas(Point::new(100.0, 100.0), Point::new(103.0, 103.0));

    harness.with_session(|s| {
        assert_eq!(common::roots_of_kind(s, ElementKind::Node).len(), 1);
        assert!(common::roots_of_kind(s, ElementKind::Group).is_empty());
    });
}

#[test]
fn test_drag_threshold_is_configurable() {
    let harness = EditorHarness::with_config(EditorConfig::default().with_drag_threshold(20.0));
    harness.drag_canvas(Point::new(100.0, 100.0), Point::new(110.0, 110.0));
    harness.with_session(|s| {
        assert_eq!(common::roots_of_kind(s, ElementKind::Node).len(), 1);
        assert!(common::roots_of_kind(s, ElementKind::Group).is_empty());
    });

    harness.drag_canvas(Point::new(400.0, 400.0), Point::new(420.0, 420.0));
    harness.with_session(|s| {
        assert_eq!(common::roots_of_kind(s, ElementKind::Group).len(), 1);
    });
}

// ============================================================================
// Group creation
// ============================================================================

#[test]
fn test_rectangle_groups_enclosed_nodes_only() {
    let harness = EditorHarness::new();
    let (a, b, c) = harness.with_session_mut(|s| {
        (
            s.create_node(Point::new(100.0, 100.0)),
            s.create_node(Point::new(300.0, 100.0)),
            s.create_node(Point::new(100.0, 400.0)),
        )
    });

    harness.drag_canvas(Point::new(50.0, 50.0), Point::new(500.0, 300.0));

    harness.with_session(|s| {
        let groups = common::roots_of_kind(s, ElementKind::Group);
        assert_eq!(groups.len(), 1);
        let group = groups[0];
        assert_eq!(s.canvas().children(group), &[a.node, b.node]);
        assert_eq!(s.canvas().parent(c.node), None);
        assert_eq!(s.focus(), Some(group));
        assert_eq!(
            s.canvas().canvas_bounds(group).unwrap(),
            Rect::new(50.0, 50.0, 450.0, 250.0)
        );
    });
}

#[test]
fn test_reverse_drag_normalizes_rectangle() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));

    harness.drag_canvas(Point::new(500.0, 300.0), Point::new(50.0, 50.0));

    harness.with_session(|s| {
        let group = s.canvas().parent(a.node).expect("node was grouped");
        assert_eq!(s.canvas().kind(group), Some(ElementKind::Group));
    });
}

#[test]
fn test_boundary_is_inclusive() {
    let harness = EditorHarness::new();
    // Node spans (100,100)..(220,160)
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));

    harness.drag_canvas(Point::new(100.0, 100.0), Point::new(221.0, 160.0));
    let grouped = harness.with_session(|s| s.canvas().parent(a.node));
    assert!(grouped.is_some());
}

#[test]
fn test_one_pixel_short_does_not_absorb() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));

    harness.drag_canvas(Point::new(100.0, 100.0), Point::new(219.0, 160.0));
    harness.with_session(|s| {
        assert_eq!(s.canvas().parent(a.node), None);
        assert_eq!(common::roots_of_kind(s, ElementKind::Group).len(), 1);
    });
}

#[test]
fn test_grouping_under_scroll_preserves_screen_position() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| {
        s.set_scroll(Point::new(200.0, 100.0));
        s.create_node(Point::new(300.0, 200.0))
    });
    let before = harness.with_session(|s| s.canvas().absolute_position(a.node).unwrap());
    assert_eq!(before, Point::new(100.0, 100.0));

    // Screen-space drag around the node's on-screen box.
    harness.drag_canvas(Point::new(50.0, 50.0), Point::new(400.0, 300.0));

    harness.with_session(|s| {
        assert!(s.canvas().parent(a.node).is_some());
        assert_eq!(s.canvas().absolute_position(a.node).unwrap(), before);
    });
}

#[test]
fn test_release_over_element_cancels_rectangle() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(500.0, 500.0)));

    harness.press(Target::Canvas, 10.0, 10.0);
    harness.release(Target::Element(a.node), 520.0, 520.0);

    harness.with_session(|s| {
        assert_eq!(s.mode(), DragMode::Idle);
        assert_eq!(s.canvas().roots(), &[a.node]);
    });
}

// ============================================================================
// Group dissolution
// ============================================================================

#[test]
fn test_delete_group_restores_children() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));
    harness.drag_canvas(Point::new(50.0, 50.0), Point::new(400.0, 300.0));
    let group = harness.with_session(|s| s.canvas().parent(a.node).unwrap());

    // Drag the group; the node moves with it.
    harness.ctrl.handle_element_moved(group, 150.0, 150.0);
    harness.frame();
    let moved = harness.with_session(|s| s.canvas().absolute_position(a.node).unwrap());
    assert_eq!(moved, Point::new(200.0, 200.0));

    harness.key(slint::platform::Key::Delete);

    harness.with_session(|s| {
        assert!(!s.canvas().contains(group));
        assert_eq!(s.canvas().roots(), &[a.node]);
        assert_eq!(s.canvas().absolute_position(a.node).unwrap(), moved);
        common::assert_consistent(s);
    });
}
