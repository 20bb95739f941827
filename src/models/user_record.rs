use serde::{Deserialize, Serialize};

/// One user row from the remote table. The id is server-assigned and opaque;
/// it is normalized to a string regardless of the JSON type the backend uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}
