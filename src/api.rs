//! One-shot board hydration over HTTP.
//!
//! The board lookup is a fallback initial render: it paints the canvas
//! before the relay's `elements_history` snapshot arrives and is superseded
//! by it. Failures degrade to an empty board at the caller's discretion —
//! nothing here panics.

use serde::Deserialize;

use crate::element::Element;
use crate::session::Session;

/// Read-only hydration snapshot returned by the board lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Hydration failures, surfaced to the caller instead of panicking.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("board fetch returned HTTP {0}")]
    Status(u16),
}

/// Fetch the board snapshot for `session`'s board id.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails or the server answers with a
/// non-success status.
pub async fn fetch_board(client: &reqwest::Client, session: &Session) -> Result<Board, ApiError> {
    let response = client.get(session.board_url()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(response.json::<Board>().await?)
}
