//! Request context for media operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Extracted by the host application's request boundary and passed into
/// service methods so that writes can be attributed to an actor. The actor
/// is optional: the module works without a user system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's id, when the host has one.
    pub actor: Option<i64>,
    /// When the request was received.
    pub request_time: Option<DateTime<Utc>>,
}

impl RequestContext {
    /// A context acting on behalf of a known user.
    pub fn acting_as(actor: i64) -> Self {
        Self {
            actor: Some(actor),
            request_time: Some(Utc::now()),
        }
    }

    /// A context with no attributed actor.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
