// src/models/user.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile snapshot returned by the OAuth provider and stored, serialized,
/// inside the session cookie.
///
/// Only `id`, `name` and `picture` are fields the application reads; every
/// other provider field is kept as an opaque passthrough so the cookie
/// round-trips the blob losslessly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,

    pub name: String,

    /// Provider-shaped picture payload (may be a bare URL or a nested
    /// object); rendered by the client, never inspected here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
