pub mod client;
pub mod error;
pub mod users;

// Re-export commonly used items
pub use client::api_call;
pub use error::ApiError;
pub use users::{delete_user, insert_user, list_users, update_user, USERS_ENDPOINT};
