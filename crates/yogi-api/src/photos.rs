// Decoding of the `photos` column.
//
// Projects store their gallery as JSON-encoded text (`"[\"a.jpg\"]"`).
// Decoding is isolated here; the fallback-to-empty policy lives in
// `Project::photo_list` and nowhere else.

use thiserror::Error;

/// Why a `photos` value could not be decoded.
#[derive(Debug, Error)]
pub enum PhotoDecodeError {
    #[error("photos field is not a JSON array of strings: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Decode JSON-encoded photo text into a list of references.
pub fn decode_photos(raw: &str) -> Result<Vec<String>, PhotoDecodeError> {
    Ok(serde_json::from_str::<Vec<String>>(raw)?)
}
