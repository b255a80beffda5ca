//! The dispatch core: one function from events to outbound envelopes.
//!
//! DESIGN
//! ======
//! [`Engine`] owns the element store, the action log, and the chat channel
//! for one participant. Every pointer sample, tool change, undo request,
//! chat submission, and inbound envelope flows through [`Engine::dispatch`]
//! as a tagged [`Event`]; the return value is the list of envelopes the
//! host must send to the relay, fire-and-forget. No callbacks mutate shared
//! state behind the engine's back, which keeps the whole reconciliation
//! path testable without a live transport.
//!
//! Remote envelopes mutate the store directly and never touch the action
//! log — remote edits are not locally undoable.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::chat::{ChatChannel, ChatMessage};
use crate::element::{Element, RectangleData};
use crate::hit::{Point, erase_target};
use crate::history::{Action, ActionKind, ActionLog};
use crate::protocol::{Envelope, Inbound};
use crate::store::ElementStore;
use crate::stroke::{LineStroke, RectDraft, StrokeStyle};

/// Which tool the pointer currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand line drawing.
    #[default]
    Pen,
    /// Drag-to-size rectangle.
    Rectangle,
    /// Remove the first element under the pointer.
    Eraser,
}

/// Everything that can happen to the engine, as one tagged union.
#[derive(Debug)]
pub enum Event {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    ToolSelected(Tool),
    UndoRequested,
    RedoRequested,
    ChatSubmitted(String),
    /// An envelope delivered by the transport.
    Envelope(Envelope),
}

/// The active pointer gesture, if any.
#[derive(Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    DrawingLine(LineStroke),
    DrawingRect(RectDraft),
    Erasing,
}

/// Per-participant synchronization engine.
#[derive(Debug, Default)]
pub struct Engine {
    store: ElementStore,
    log: ActionLog,
    chat: ChatChannel,
    tool: Tool,
    style: StrokeStyle,
    gesture: Gesture,
    user: String,
}

impl Engine {
    /// Create an engine for the named participant.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into(), ..Self::default() }
    }

    /// Seed the store from the hydration snapshot. Superseded wholesale if
    /// the relay later pushes `elements_history`.
    pub fn load_elements(&mut self, elements: Vec<Element>) {
        self.store.load_snapshot(elements);
    }

    /// Process one event, returning the envelopes to send to the relay.
    pub fn dispatch(&mut self, event: Event) -> Vec<Envelope> {
        match event {
            Event::PointerDown(p) => self.pointer_down(p),
            Event::PointerMove(p) => self.pointer_move(p),
            Event::PointerUp(p) => self.pointer_up(p),
            Event::ToolSelected(tool) => {
                self.tool = tool;
                Vec::new()
            }
            Event::UndoRequested => match self.log.undo(&mut self.store) {
                Some(action) => vec![self.inverse_envelope(&action)],
                None => Vec::new(),
            },
            Event::RedoRequested => match self.log.redo(&mut self.store) {
                Some(action) => vec![self.forward_envelope(&action)],
                None => Vec::new(),
            },
            Event::ChatSubmitted(text) => self.chat_submitted(&text),
            Event::Envelope(envelope) => {
                self.apply_inbound(&envelope);
                Vec::new()
            }
        }
    }

    // --- Pointer gestures ---

    fn pointer_down(&mut self, p: Point) -> Vec<Envelope> {
        match self.tool {
            Tool::Pen => {
                let (stroke, envelope) =
                    LineStroke::begin(p, &self.style, &mut self.store, &self.user);
                self.gesture = Gesture::DrawingLine(stroke);
                vec![envelope]
            }
            Tool::Rectangle => {
                self.gesture = Gesture::DrawingRect(RectDraft::begin(p));
                Vec::new()
            }
            Tool::Eraser => {
                self.gesture = Gesture::Erasing;
                Vec::new()
            }
        }
    }

    fn pointer_move(&mut self, p: Point) -> Vec<Envelope> {
        match &mut self.gesture {
            Gesture::DrawingLine(stroke) => {
                vec![stroke.extend(p, &mut self.store, &self.user)]
            }
            Gesture::DrawingRect(draft) => {
                draft.update(p);
                Vec::new()
            }
            Gesture::Erasing => self.erase_sample(p),
            Gesture::Idle => Vec::new(),
        }
    }

    fn pointer_up(&mut self, p: Point) -> Vec<Envelope> {
        match std::mem::take(&mut self.gesture) {
            Gesture::DrawingLine(stroke) => {
                let Some((envelope, action)) = stroke.finish(&self.store, &self.user) else {
                    return Vec::new();
                };
                self.log.push(action);
                vec![envelope]
            }
            Gesture::DrawingRect(mut draft) => {
                draft.update(p);
                let (envelope, action) = draft.finish(&mut self.store, &self.user);
                self.log.push(action);
                vec![envelope]
            }
            Gesture::Erasing | Gesture::Idle => Vec::new(),
        }
    }

    /// One eraser sample: at most one deletion, so each swipe is a run of
    /// independently undoable deletes.
    fn erase_sample(&mut self, p: Point) -> Vec<Envelope> {
        let Some(id) = erase_target(&self.store, p) else {
            return Vec::new();
        };
        let Some(element) = self.store.remove(&id) else {
            return Vec::new();
        };
        self.log.push(Action::delete(element));
        vec![Envelope::delete_element(&id, &self.user)]
    }

    // --- Chat ---

    /// The relay fans out only to other participants, so the sender appends
    /// its own message locally at send time.
    fn chat_submitted(&mut self, text: &str) -> Vec<Envelope> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.chat.push(ChatMessage { user: self.user.clone(), text: text.to_owned() });
        vec![Envelope::chat(text, &self.user)]
    }

    // --- Inbound reconciliation ---

    fn apply_inbound(&mut self, envelope: &Envelope) {
        match envelope.decode() {
            Ok(Inbound::AddElement(element) | Inbound::DrawSnapshot(element)) => {
                self.store.upsert(element);
            }
            Ok(Inbound::DrawPoint { element_id, point }) => {
                self.store.append_point(&element_id, point);
            }
            Ok(Inbound::DeleteElement(id)) => {
                self.store.remove(&id);
            }
            Ok(Inbound::Chat(message)) => self.chat.push(message),
            Ok(Inbound::ChatHistory(messages)) => self.chat.load_history(messages),
            Ok(Inbound::ElementsHistory(elements)) => self.store.load_snapshot(elements),
            Ok(Inbound::Unknown) => {
                debug!(action = %envelope.action, "ignoring unrecognized action");
            }
            Err(e) => {
                warn!(error = %e, action = %envelope.action, "dropping malformed envelope");
            }
        }
    }

    // --- Undo/redo broadcast ---

    fn inverse_envelope(&self, action: &Action) -> Envelope {
        match action.kind {
            ActionKind::Add => Envelope::delete_element(&action.element.element_id, &self.user),
            ActionKind::Delete => Envelope::add_element(&action.element, &self.user),
        }
    }

    fn forward_envelope(&self, action: &Action) -> Envelope {
        match action.kind {
            ActionKind::Add => Envelope::add_element(&action.element, &self.user),
            ActionKind::Delete => Envelope::delete_element(&action.element.element_id, &self.user),
        }
    }

    // --- Queries ---

    /// The local element store.
    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The chat log.
    #[must_use]
    pub fn chat(&self) -> &ChatChannel {
        &self.chat
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Pen styling for subsequent strokes.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Whether an undo would have any effect.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Whether a redo would have any effect.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// The provisional rectangle under construction, for live preview.
    #[must_use]
    pub fn preview_rect(&self) -> Option<RectangleData> {
        match &self.gesture {
            Gesture::DrawingRect(draft) => Some(draft.preview()),
            _ => None,
        }
    }
}
