use crate::api::{delete_user, insert_user, list_users, update_user};
use crate::models::UserRecord;

/// In-memory state behind the directory page: the record list, the form
/// fields, and which record (if any) the form is editing.
///
/// The remote table is the source of truth. `records` is rebuilt wholesale by
/// [`load`](Self::load) and patched incrementally after each successful
/// mutation; it is never written to before the backend confirms. Remote
/// failures are logged for the operator and otherwise swallowed, so on any
/// failure the state is exactly what it was before the call.
pub struct UserDirectoryView {
    client: reqwest::Client,
    api_base_url: String,
    api_key: String,
    records: Vec<UserRecord>,
    form_name: String,
    form_email: String,
    editing_id: Option<String>,
}

impl UserDirectoryView {
    pub fn new(client: reqwest::Client, api_base_url: String, api_key: String) -> Self {
        Self {
            client,
            api_base_url,
            api_key,
            records: Vec::new(),
            form_name: String::new(),
            form_email: String::new(),
            editing_id: None,
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn form_email(&self) -> &str {
        &self.form_email
    }

    /// Absent ⇒ the form is in create mode.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Sync submitted form input into the view before [`submit`](Self::submit).
    pub fn set_form(&mut self, name: &str, email: &str) {
        self.form_name = name.trim().to_string();
        self.form_email = email.trim().to_string();
    }

    /// Copy the matching record's fields into the form and switch to edit
    /// mode. Purely local; an unknown id is a no-op.
    pub fn begin_edit(&mut self, id: &str) {
        if let Some(rec) = self.records.iter().find(|r| r.id == id) {
            self.form_name = rec.name.clone();
            self.form_email = rec.email.clone();
            self.editing_id = Some(rec.id.clone());
        }
    }

    /// Leave edit mode and clear the form. Purely local.
    pub fn cancel_edit(&mut self) {
        self.form_name.clear();
        self.form_email.clear();
        self.editing_id = None;
    }

    /// Fetch all records and replace the list wholesale. On failure the
    /// previous list is kept.
    pub async fn load(&mut self) {
        match list_users(&self.client, &self.api_base_url, &self.api_key).await {
            Ok(users) => {
                self.records = users;
            }
            Err(e) => {
                tracing::error!(%e, "Failed to fetch users");
            }
        }
    }

    /// Create or update depending on the form mode. A blank name or email
    /// means no remote call is made at all.
    pub async fn submit(&mut self) {
        if self.form_name.trim().is_empty() || self.form_email.trim().is_empty() {
            return;
        }
        match self.editing_id.clone() {
            None => self.create().await,
            Some(id) => self.update(&id).await,
        }
    }

    async fn create(&mut self) {
        match insert_user(
            &self.client,
            &self.api_base_url,
            &self.api_key,
            &self.form_name,
            &self.form_email,
        )
        .await
        {
            Ok(created) => {
                self.records.extend(created);
                self.form_name.clear();
                self.form_email.clear();
            }
            Err(e) => {
                tracing::error!(%e, "Failed to add user");
            }
        }
    }

    async fn update(&mut self, id: &str) {
        match update_user(
            &self.client,
            &self.api_base_url,
            &self.api_key,
            id,
            &self.form_name,
            &self.form_email,
        )
        .await
        {
            Ok(updated) => {
                // An update that matches no row comes back empty; the form
                // and the list stay exactly as they were.
                let Some(row) = updated.into_iter().next() else {
                    tracing::debug!(id, "Update matched no row");
                    return;
                };
                if let Some(slot) = self.records.iter_mut().find(|r| r.id == row.id) {
                    *slot = row;
                }
                self.form_name.clear();
                self.form_email.clear();
                self.editing_id = None;
            }
            Err(e) => {
                tracing::error!(%e, "Failed to update user");
            }
        }
    }

    /// Delete remotely, then drop the matching entry locally. Order of the
    /// remaining records is preserved.
    pub async fn remove(&mut self, id: &str) {
        match delete_user(&self.client, &self.api_base_url, &self.api_key, id).await {
            Ok(()) => {
                self.records.retain(|r| r.id != id);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to delete user");
            }
        }
    }
}
