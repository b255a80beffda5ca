//! Envelope — the message unit exchanged with the relay.
//!
//! DESIGN
//! ======
//! Every frame on the wire is one JSON envelope `{action, payload, user}`.
//! The `action` string selects the payload shape; `payload` stays an open
//! `serde_json::Value` until [`Envelope::decode`] lifts it into a typed
//! [`Inbound`] value. Unrecognized actions decode to [`Inbound::Unknown`]
//! so new peers can speak newer dialects without breaking old clients; a
//! known action with a malformed payload is an error the caller drops and
//! logs, never a crash.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::element::{Element, ElementId};

/// Insert-or-replace a full element.
pub const ACTION_ADD_ELEMENT: &str = "add_element";

/// Incremental stroke traffic: a point delta or a terminal full snapshot.
pub const ACTION_DRAW: &str = "draw";

/// Remove an element by id.
pub const ACTION_DELETE_ELEMENT: &str = "delete_element";

/// One chat message.
pub const ACTION_CHAT: &str = "chat";

/// Full chat replay, pushed once on join.
pub const ACTION_CHAT_HISTORY: &str = "chat_history";

/// Full element replay, pushed once on join.
pub const ACTION_ELEMENTS_HISTORY: &str = "elements_history";

/// The wire-level message unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub user: String,
}

// =============================================================================
// CONSTRUCTORS (outbound)
// =============================================================================

impl Envelope {
    fn outbound(action: &str, payload: serde_json::Value, user: &str) -> Self {
        Self {
            action: action.to_owned(),
            payload,
            user: user.to_owned(),
        }
    }

    /// Announce a new (or replaced) element with its full payload.
    #[must_use]
    pub fn add_element(element: &Element, user: &str) -> Self {
        Self::outbound(
            ACTION_ADD_ELEMENT,
            serde_json::to_value(element).unwrap_or_default(),
            user,
        )
    }

    /// One stroke sample: append `point` to the line named by `element_id`.
    /// Deltas keep high-frequency pointer traffic small.
    #[must_use]
    pub fn draw_point(element_id: &str, point: [f64; 2], user: &str) -> Self {
        Self::outbound(
            ACTION_DRAW,
            serde_json::json!({ "element_id": element_id, "point": point }),
            user,
        )
    }

    /// Terminal stroke snapshot: the full finalized line, resynchronizing
    /// any peer that missed deltas.
    #[must_use]
    pub fn draw_snapshot(element: &Element, user: &str) -> Self {
        Self::outbound(
            ACTION_DRAW,
            serde_json::to_value(element).unwrap_or_default(),
            user,
        )
    }

    /// Remove an element by id.
    #[must_use]
    pub fn delete_element(element_id: &str, user: &str) -> Self {
        Self::outbound(
            ACTION_DELETE_ELEMENT,
            serde_json::json!({ "element_id": element_id }),
            user,
        )
    }

    /// One outbound chat message.
    #[must_use]
    pub fn chat(text: &str, user: &str) -> Self {
        Self::outbound(ACTION_CHAT, serde_json::json!({ "text": text }), user)
    }
}

// =============================================================================
// DECODING (inbound)
// =============================================================================

/// A decoded inbound envelope, ready to apply to local state.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    AddElement(Element),
    DrawPoint { element_id: ElementId, point: [f64; 2] },
    DrawSnapshot(Element),
    DeleteElement(ElementId),
    Chat(ChatMessage),
    ChatHistory(Vec<ChatMessage>),
    ElementsHistory(Vec<Element>),
    /// Unrecognized action name. Ignored for forward compatibility.
    Unknown,
}

/// A known action arrived with a payload it cannot carry.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid `{action}` payload: {source}")]
    Payload {
        action: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{action}` payload missing field `{field}`")]
    MissingField { action: String, field: &'static str },
}

impl Envelope {
    /// Lift the payload into a typed [`Inbound`] value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when a recognized action carries a payload
    /// that does not parse. Callers drop and log such frames.
    pub fn decode(&self) -> Result<Inbound, DecodeError> {
        match self.action.as_str() {
            ACTION_ADD_ELEMENT => Ok(Inbound::AddElement(self.payload_as()?)),
            ACTION_DRAW => self.decode_draw(),
            ACTION_DELETE_ELEMENT => {
                let element_id = self
                    .payload
                    .get("element_id")
                    .and_then(|v| v.as_str())
                    .ok_or(DecodeError::MissingField {
                        action: self.action.clone(),
                        field: "element_id",
                    })?;
                Ok(Inbound::DeleteElement(element_id.to_owned()))
            }
            ACTION_CHAT => Ok(Inbound::Chat(self.decode_chat()?)),
            ACTION_CHAT_HISTORY => Ok(Inbound::ChatHistory(self.payload_as()?)),
            ACTION_ELEMENTS_HISTORY => Ok(Inbound::ElementsHistory(self.payload_as()?)),
            _ => Ok(Inbound::Unknown),
        }
    }

    /// A `draw` payload is a delta when it carries `point`, otherwise a full
    /// element snapshot.
    fn decode_draw(&self) -> Result<Inbound, DecodeError> {
        if let Some(point) = self.payload.get("point") {
            let element_id = self
                .payload
                .get("element_id")
                .and_then(|v| v.as_str())
                .ok_or(DecodeError::MissingField {
                    action: self.action.clone(),
                    field: "element_id",
                })?;
            let point: [f64; 2] =
                serde_json::from_value(point.clone()).map_err(|source| DecodeError::Payload {
                    action: self.action.clone(),
                    source,
                })?;
            return Ok(Inbound::DrawPoint { element_id: element_id.to_owned(), point });
        }
        Ok(Inbound::DrawSnapshot(self.payload_as()?))
    }

    /// Inbound chat carries `{user, text}`; a missing payload user falls
    /// back to the envelope-level sender.
    fn decode_chat(&self) -> Result<ChatMessage, DecodeError> {
        let text = self
            .payload
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or(DecodeError::MissingField { action: self.action.clone(), field: "text" })?;
        let user = self
            .payload
            .get("user")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.user);
        Ok(ChatMessage { user: user.to_owned(), text: text.to_owned() })
    }

    fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_value(self.payload.clone()).map_err(|source| DecodeError::Payload {
            action: self.action.clone(),
            source,
        })
    }
}
