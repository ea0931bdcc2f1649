//! Connectivity check payloads

use serde::{Deserialize, Serialize};

/// Greeting returned by the unauthenticated `/hello` route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hello {
    pub hello: String,
}
