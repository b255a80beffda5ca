use super::*;
use crate::protocol::{ACTION_ADD_ELEMENT, ACTION_CHAT, ACTION_DELETE_ELEMENT, ACTION_DRAW};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Feed every envelope one engine produced into another, as the relay would.
fn relay(from: Vec<Envelope>, to: &mut Engine) {
    for envelope in from {
        to.dispatch(Event::Envelope(envelope));
    }
}

// =============================================================
// Pen gestures
// =============================================================

#[test]
fn pen_drag_announces_then_streams_deltas_then_snapshots() {
    let mut engine = Engine::new("ada");

    let down = engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].action, ACTION_ADD_ELEMENT);

    let move1 = engine.dispatch(Event::PointerMove(p(5.0, 5.0)));
    assert_eq!(move1[0].action, ACTION_DRAW);
    assert!(move1[0].payload.get("point").is_some());

    engine.dispatch(Event::PointerMove(p(10.0, 10.0)));
    let up = engine.dispatch(Event::PointerUp(p(10.0, 10.0)));
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].action, ACTION_DRAW);
    assert!(up[0].payload.get("point").is_none(), "terminal frame is a snapshot");

    assert_eq!(engine.store().len(), 1);
    let line = engine.store().iter().next().unwrap().as_line().unwrap();
    assert_eq!(line.points, vec![0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
    assert!(engine.can_undo());
}

#[test]
fn pointer_up_after_remote_erase_emits_nothing() {
    let mut engine = Engine::new("ada");
    let down = engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    let id = down[0].payload["element_id"].as_str().unwrap().to_owned();

    engine.dispatch(Event::Envelope(Envelope::delete_element(&id, "brin")));

    let up = engine.dispatch(Event::PointerUp(p(5.0, 5.0)));
    assert!(up.is_empty());
    assert!(!engine.can_undo(), "an erased stroke never reached the log");
}

#[test]
fn idle_pointer_moves_produce_nothing() {
    let mut engine = Engine::new("ada");
    assert!(engine.dispatch(Event::PointerMove(p(1.0, 1.0))).is_empty());
    assert!(engine.dispatch(Event::PointerUp(p(1.0, 1.0))).is_empty());
}

// =============================================================
// Rectangle gestures
// =============================================================

#[test]
fn rect_drag_broadcasts_only_on_release() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::ToolSelected(Tool::Rectangle));

    assert!(engine.dispatch(Event::PointerDown(p(10.0, 10.0))).is_empty());
    assert!(engine.dispatch(Event::PointerMove(p(20.0, 20.0))).is_empty());
    assert!(engine.preview_rect().is_some());

    let up = engine.dispatch(Event::PointerUp(p(30.0, 25.0)));
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].action, ACTION_ADD_ELEMENT);
    assert!(engine.preview_rect().is_none());

    let rect = engine.store().iter().next().unwrap().as_rectangle().unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (10.0, 10.0, 20.0, 15.0));
    assert!(engine.can_undo());
}

// =============================================================
// Eraser gestures
// =============================================================

#[test]
fn eraser_swipe_deletes_and_is_undoable() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    engine.dispatch(Event::PointerMove(p(10.0, 0.0)));
    engine.dispatch(Event::PointerUp(p(10.0, 0.0)));

    engine.dispatch(Event::ToolSelected(Tool::Eraser));
    engine.dispatch(Event::PointerDown(p(50.0, 50.0)));
    let swipe = engine.dispatch(Event::PointerMove(p(5.0, 2.0)));

    assert_eq!(swipe.len(), 1);
    assert_eq!(swipe[0].action, ACTION_DELETE_ELEMENT);
    assert!(engine.store().is_empty());

    let undo = engine.dispatch(Event::UndoRequested);
    assert_eq!(undo[0].action, ACTION_ADD_ELEMENT);
    assert_eq!(engine.store().len(), 1);
}

#[test]
fn eraser_misses_quietly() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::ToolSelected(Tool::Eraser));
    engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    assert!(engine.dispatch(Event::PointerMove(p(1.0, 1.0))).is_empty());
}

// =============================================================
// Undo and redo broadcasting
// =============================================================

#[test]
fn undo_of_add_broadcasts_a_delete_and_redo_restores() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::ToolSelected(Tool::Rectangle));
    engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    engine.dispatch(Event::PointerUp(p(10.0, 10.0)));

    let undo = engine.dispatch(Event::UndoRequested);
    assert_eq!(undo.len(), 1);
    assert_eq!(undo[0].action, ACTION_DELETE_ELEMENT);
    assert!(engine.store().is_empty());
    assert!(engine.can_redo());

    let redo = engine.dispatch(Event::RedoRequested);
    assert_eq!(redo[0].action, ACTION_ADD_ELEMENT);
    assert_eq!(engine.store().len(), 1);
}

#[test]
fn undo_with_empty_log_is_silent() {
    let mut engine = Engine::new("ada");
    assert!(engine.dispatch(Event::UndoRequested).is_empty());
    assert!(engine.dispatch(Event::RedoRequested).is_empty());
}

#[test]
fn remote_edits_are_not_locally_undoable() {
    let mut engine = Engine::new("ada");
    let mut peer = Engine::new("brin");

    peer.dispatch(Event::ToolSelected(Tool::Rectangle));
    peer.dispatch(Event::PointerDown(p(0.0, 0.0)));
    relay(peer.dispatch(Event::PointerUp(p(5.0, 5.0))), &mut engine);

    assert_eq!(engine.store().len(), 1);
    assert!(!engine.can_undo());
}

#[test]
fn new_edit_after_undo_clears_redo() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::ToolSelected(Tool::Rectangle));
    engine.dispatch(Event::PointerDown(p(0.0, 0.0)));
    engine.dispatch(Event::PointerUp(p(5.0, 5.0)));
    engine.dispatch(Event::UndoRequested);
    assert!(engine.can_redo());

    engine.dispatch(Event::PointerDown(p(20.0, 20.0)));
    engine.dispatch(Event::PointerUp(p(25.0, 25.0)));
    assert!(!engine.can_redo());
}

// =============================================================
// Chat
// =============================================================

#[test]
fn chat_submit_echoes_locally_and_broadcasts() {
    let mut engine = Engine::new("ada");
    let out = engine.dispatch(Event::ChatSubmitted("hello".to_owned()));

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].action, ACTION_CHAT);
    assert_eq!(engine.chat().messages().len(), 1);
    assert_eq!(engine.chat().messages()[0].user, "ada");
    assert_eq!(engine.chat().messages()[0].text, "hello");
}

#[test]
fn blank_chat_submissions_are_dropped() {
    let mut engine = Engine::new("ada");
    assert!(engine.dispatch(Event::ChatSubmitted("   ".to_owned())).is_empty());
    assert!(engine.chat().is_empty());
}

#[test]
fn inbound_chat_and_history_populate_the_channel() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::Envelope(Envelope {
        action: "chat_history".to_owned(),
        payload: serde_json::json!([{ "user": "brin", "text": "old" }]),
        user: String::new(),
    }));
    engine.dispatch(Event::Envelope(Envelope::chat("new", "brin")));

    let texts: Vec<&str> = engine.chat().messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["old", "new"]);
}

// =============================================================
// Inbound robustness
// =============================================================

#[test]
fn malformed_and_unknown_envelopes_are_ignored() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::Envelope(Envelope {
        action: "add_element".to_owned(),
        payload: serde_json::json!({ "garbage": true }),
        user: String::new(),
    }));
    engine.dispatch(Event::Envelope(Envelope {
        action: "presence_update".to_owned(),
        payload: serde_json::json!({}),
        user: String::new(),
    }));
    assert!(engine.store().is_empty());
}

#[test]
fn elements_history_replaces_the_hydration_snapshot() {
    let mut engine = Engine::new("ada");
    engine.load_elements(vec![Element::new(
        "stale".to_owned(),
        crate::element::ElementData::Line(crate::element::LineData {
            points: vec![0.0, 0.0],
            color: "#ffffff".to_owned(),
            stroke_width: 2.0,
        }),
    )]);

    engine.dispatch(Event::Envelope(Envelope {
        action: "elements_history".to_owned(),
        payload: serde_json::json!([]),
        user: String::new(),
    }));
    assert!(engine.store().is_empty());
}

// =============================================================
// Two-client convergence
// =============================================================

#[test]
fn two_clients_converge_on_a_drawn_line() {
    let mut ada = Engine::new("ada");
    let mut brin = Engine::new("brin");

    relay(ada.dispatch(Event::PointerDown(p(0.0, 0.0))), &mut brin);
    relay(ada.dispatch(Event::PointerMove(p(5.0, 5.0))), &mut brin);
    relay(ada.dispatch(Event::PointerMove(p(10.0, 10.0))), &mut brin);
    relay(ada.dispatch(Event::PointerUp(p(10.0, 10.0))), &mut brin);

    assert_eq!(brin.store().len(), 1);
    let ada_line = ada.store().iter().next().unwrap();
    let brin_line = brin.store().iter().next().unwrap();
    assert_eq!(ada_line, brin_line);
}

#[test]
fn two_clients_converge_on_erase_and_undo() {
    let mut ada = Engine::new("ada");
    let mut brin = Engine::new("brin");

    relay(ada.dispatch(Event::PointerDown(p(0.0, 0.0))), &mut brin);
    relay(ada.dispatch(Event::PointerMove(p(10.0, 0.0))), &mut brin);
    relay(ada.dispatch(Event::PointerUp(p(10.0, 0.0))), &mut brin);

    // Brin erases Ada's line.
    brin.dispatch(Event::ToolSelected(Tool::Eraser));
    brin.dispatch(Event::PointerDown(p(5.0, 1.0)));
    relay(brin.dispatch(Event::PointerMove(p(5.0, 1.0))), &mut ada);

    assert!(ada.store().is_empty());
    assert!(brin.store().is_empty());

    // Brin undoes the erase; the line comes back on both sides.
    relay(brin.dispatch(Event::UndoRequested), &mut ada);
    assert_eq!(ada.store().len(), 1);
    assert_eq!(
        ada.store().iter().next().unwrap(),
        brin.store().iter().next().unwrap()
    );
}

#[test]
fn delta_for_an_unseen_line_does_not_poison_later_traffic() {
    let mut engine = Engine::new("ada");
    engine.dispatch(Event::Envelope(Envelope::draw_point("ghost", [1.0, 1.0], "brin")));
    assert!(engine.store().is_empty());

    let mut peer = Engine::new("brin");
    peer.dispatch(Event::ToolSelected(Tool::Rectangle));
    peer.dispatch(Event::PointerDown(p(0.0, 0.0)));
    relay(peer.dispatch(Event::PointerUp(p(4.0, 4.0))), &mut engine);
    assert_eq!(engine.store().len(), 1);
}
