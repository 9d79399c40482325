//! Level 5: Keyboard Input Tests
//!
//! Tests Enter for new nodes, typing into labels, and free typing that
//! spawns a labeled node.

mod common;

use common::harness::EditorHarness;
use slint::platform::Key;
use slint::SharedString;
use slint_graph_canvas::{ElementKind, Point, Target};

#[test]
fn test_enter_without_selection_spawns_in_visible_area() {
    let harness = EditorHarness::new();
    harness.with_session_mut(|s| s.set_scroll(Point::new(2000.0, 500.0)));

    harness.key(Key::Return);

    harness.with_session(|s| {
        let nodes = common::roots_of_kind(s, ElementKind::Node);
        assert_eq!(nodes.len(), 1);
        let origin = s.canvas().canvas_position(nodes[0]).unwrap();
        assert!((2000.0..3000.0).contains(&origin.x), "x = {}", origin.x);
        assert!((500.0..900.0).contains(&origin.y), "y = {}", origin.y);
        assert_eq!(origin.x.fract(), 0.0);
        assert_eq!(s.focus(), Some(nodes[0]));
    });
}

#[test]
fn test_spawn_positions_are_reproducible() {
    let spawn = || {
        let harness = EditorHarness::new();
        harness.key(Key::Return);
        harness.with_session(|s| s.canvas().canvas_position(s.canvas().roots()[0]).unwrap())
    };
    assert_eq!(spawn(), spawn());
}

#[test]
fn test_enter_with_selection_places_node_below() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));

    harness.key(Key::Return);

    harness.with_session(|s| {
        let nodes = common::roots_of_kind(s, ElementKind::Node);
        assert_eq!(nodes.len(), 2);
        let below = nodes[1];
        assert_ne!(below, a.node);
        // A spans y 100..160; the gap is 36.
        assert_eq!(
            s.canvas().canvas_position(below).unwrap(),
            Point::new(100.0, 196.0)
        );
        assert_eq!(s.focus(), Some(below));
        let label = s.canvas().label_of(below).unwrap();
        assert_eq!(s.selection().map(|sel| sel.label), Some(label));
    });

    // Repeated Enter builds a column.
    harness.key(Key::Return);
    harness.with_session(|s| {
        let nodes = common::roots_of_kind(s, ElementKind::Node);
        assert_eq!(
            s.canvas().canvas_position(nodes[2]).unwrap(),
            Point::new(100.0, 292.0)
        );
    });
}

#[test]
fn test_enter_discards_text_typed_in_same_frame() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));
    let key_pressed = harness.ctrl.key_pressed_callback();

    key_pressed(SharedString::from("h"));
    key_pressed(SharedString::from("i"));
    key_pressed(Key::Return.into());
    harness.frame();

    harness.with_session(|s| {
        assert_eq!(s.canvas().text(a.label), Some(""));
        assert_eq!(s.canvas().roots().len(), 2);
    });
}

#[test]
fn test_backspace_between_characters_in_one_frame() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| {
        let a = s.create_node(Point::new(100.0, 100.0));
        s.set_label_text(a.label, "x").unwrap();
        a
    });
    let key_pressed = harness.ctrl.key_pressed_callback();

    key_pressed(SharedString::from("a"));
    key_pressed(SharedString::from("b"));
    key_pressed(Key::Backspace.into());
    key_pressed(SharedString::from("c"));
    harness.frame();

    harness.with_session(|s| {
        assert_eq!(s.canvas().text(a.label), Some("xac"));
        assert_eq!(s.canvas().roots(), &[a.node]);
    });
}

#[test]
fn test_backspace_after_first_character_keeps_node() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(100.0, 100.0)));
    let key_pressed = harness.ctrl.key_pressed_callback();

    key_pressed(SharedString::from("a"));
    key_pressed(Key::Backspace.into());
    harness.frame();

    harness.with_session(|s| {
        assert!(s.canvas().contains(a.node));
        assert_eq!(s.canvas().text(a.label), Some(""));
        assert_eq!(s.canvas().roots(), &[a.node]);
        assert_eq!(s.selection().map(|sel| sel.label), Some(a.label));
    });
}

#[test]
fn test_free_typing_spawns_labeled_node() {
    let harness = EditorHarness::new();
    harness.type_text("Hello");

    harness.with_session(|s| {
        let nodes = common::roots_of_kind(s, ElementKind::Node);
        assert_eq!(nodes.len(), 1);
        let label = s.canvas().label_of(nodes[0]).unwrap();
        assert_eq!(s.canvas().text(label), Some("Hello"));
    });

    // Further typing goes to the same label.
    harness.type_text(" world");
    harness.with_session(|s| {
        assert_eq!(s.canvas().roots().len(), 1);
        let label = s.selection().unwrap().label;
        assert_eq!(s.canvas().text(label), Some("Hello world"));
    });
}

#[test]
fn test_typing_after_clicking_a_node_edits_its_label() {
    let harness = EditorHarness::new();
    let (a, b) = harness.with_session_mut(|s| {
        (
            s.create_node(Point::new(0.0, 0.0)),
            s.create_node(Point::new(300.0, 0.0)),
        )
    });

    harness.press(Target::Element(a.label), 60.0, 30.0);
    harness.release(Target::Element(a.label), 60.0, 30.0);
    harness.type_text("A");

    harness.with_session(|s| {
        assert_eq!(s.canvas().text(a.label), Some("A"));
        assert_eq!(s.canvas().text(b.label), Some(""));
        assert_eq!(s.focus(), Some(a.node));
    });
}

#[test]
fn test_label_edit_from_toolkit() {
    let harness = EditorHarness::new();
    let a = harness.with_session_mut(|s| s.create_node(Point::new(0.0, 0.0)));

    harness.ctrl.handle_label_edited(a.label, SharedString::from("edited"));
    // Sockets are not editable; the edit is ignored.
    let socket = a.socket(slint_graph_canvas::Direction::Left);
    harness.ctrl.handle_label_edited(socket, SharedString::from("x"));

    harness.with_session(|s| {
        assert_eq!(s.canvas().text(a.label), Some("edited"));
        assert_eq!(s.canvas().text(a.socket(slint_graph_canvas::Direction::Left)), Some(""));
    });
}

#[test]
fn test_resizing_node_moves_sockets_and_focuses_it() {
    let harness = EditorHarness::new();
    let (a, b) = harness.with_session_mut(|s| {
        (
            s.create_node(Point::new(0.0, 0.0)),
            s.create_node(Point::new(300.0, 0.0)),
        )
    });

    harness.ctrl.handle_element_resized(a.node, 200.0, 100.0);
    harness.frame();

    harness.with_session(|s| {
        assert_eq!(s.focus(), Some(a.node));
        assert_eq!(s.selection().map(|sel| sel.label), Some(a.label));
        assert_ne!(s.focus(), Some(b.node));
        assert_eq!(
            s.canvas()
                .midpoint(a.socket(slint_graph_canvas::Direction::Down))
                .unwrap(),
            Point::new(100.0, 100.0)
        );
    });
}

#[test]
fn test_unknown_keys_are_rejected() {
    let harness = EditorHarness::new();
    let key_pressed = harness.ctrl.key_pressed_callback();
    assert!(!key_pressed(Key::F1.into()));
    assert!(key_pressed(Key::Delete.into()));
}
