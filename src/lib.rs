//! Client-side synchronization engine for a collaborative whiteboard.
//!
//! This crate owns everything between the pointer device and the wire: the
//! in-memory element store, the undo/redo action log, incremental stroke
//! accumulation, hit-testing for the eraser, the JSON envelope protocol, and
//! the WebSocket transport that exchanges envelopes with the relay. The host
//! application feeds [`engine::Event`]s in; the engine hands back outbound
//! [`protocol::Envelope`]s to send fire-and-forget.
//!
//! Convergence is deliberately simple: last write per element id, relying on
//! the relay's per-sender FIFO delivery. There is no CRDT or operational
//! transform here — two peers racing on the same id is an accepted
//! limitation, not a supported case.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Single dispatch loop over store, history, and chat |
//! | [`store`] | Insertion-ordered element store |
//! | [`element`] | Element model, wire codec, and id generation |
//! | [`stroke`] | Pen stroke accumulator and rectangle draft |
//! | [`hit`] | Geometry predicates driving erasure |
//! | [`history`] | Local undo/redo stacks |
//! | [`protocol`] | Envelope wire format and inbound decoding |
//! | [`chat`] | Append-only chat channel |
//! | [`transport`] | WebSocket adapter (connect, send, receive) |
//! | [`api`] | One-shot board hydration over HTTP |
//! | [`session`] | Login-scoped configuration value |
//! | [`client`] | Glue: hydrate, connect, pump |
//! | [`consts`] | Shared numeric and style constants |

pub mod api;
pub mod chat;
pub mod client;
pub mod consts;
pub mod element;
pub mod engine;
pub mod hit;
pub mod history;
pub mod protocol;
pub mod session;
pub mod store;
pub mod stroke;
pub mod transport;
