use serde::{Deserialize, Serialize};

/// Writer identity - the opaque id of the authenticated user who authored a
/// post. Equality on this type is the ownership check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Writer {
    pub id: String,
}

impl Writer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
