//! Audit log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recorded administrative or authentication event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Short machine-readable action name, e.g. `"delete_role"`.
    pub action: String,
    /// The acting user, when known.
    pub user_id: Option<Uuid>,
    /// Free-form human-readable details.
    pub details: String,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}
