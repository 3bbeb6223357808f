use serde::{Deserialize, Serialize};

/// A single catalog entry as returned by the remote joke service.
/// Immutable once received; the client tracks no identity for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub value: String,
    pub url: String,
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Wrapper object returned by the search endpoint. Unknown sibling
/// fields (result counts etc.) are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<Joke>,
}
