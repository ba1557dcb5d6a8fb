use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload; `sub` is the collection owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,    // owner id
    pub name: String, // username
    pub iat: usize,   // issued at (unix timestamp)
    pub exp: usize,   // expires at (unix timestamp)
    pub iss: String,
    pub aud: String,
}
