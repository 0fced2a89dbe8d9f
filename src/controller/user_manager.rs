use tracing::{error, info, instrument, warn};

use super::dialog::Dialog;
use super::notice::Notice;
use crate::clients::UserClient;
use crate::domain::{User, UserCreate};
use crate::error::UserError;

const TITLE: &str = "User Status";

/// Paged user list with the add and edit dialogs.
pub struct UserManager {
    client: UserClient,
    page: u32,
    page_size: u32,
    page_count: u32,
    rows: Vec<User>,
    pub add_dialog: Dialog,
    pub edit_dialog: Dialog,
    editing: Option<User>,
}

impl UserManager {
    pub fn new(client: UserClient, page_size: u32) -> Self {
        Self {
            client,
            page: 1,
            page_size,
            page_count: 1,
            rows: Vec::new(),
            add_dialog: Dialog::default(),
            edit_dialog: Dialog::default(),
            editing: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    /// Fetches the current page. On failure the previous rows stay in place.
    #[instrument(skip(self), fields(page = self.page, size = self.page_size))]
    pub async fn refresh(&mut self) {
        match self.client.list_users(self.page, self.page_size).await {
            Ok(page) => {
                info!(count = page.data.len(), page_count = page.page_count, "Fetched users");
                self.rows = page.data;
                self.page_count = page.page_count;
            }
            Err(e) => error!(error = %e, "Error fetching users"),
        }
    }

    /// Page-selector callback; the next `refresh` fetches this page.
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.set_page(page);
        self.refresh().await;
    }

    #[instrument(skip(self, user), fields(user_name = %user.user_name))]
    pub async fn add_user(&mut self, user: UserCreate) {
        self.add_dialog.open();
        if !self.add_dialog.begin_submit() {
            return;
        }
        match self.client.create_user(user).await {
            Ok(()) => {
                info!("User added successfully");
                self.add_dialog.succeed(Notice::success(TITLE, "User added successfully"));
                self.refresh().await;
            }
            Err(UserError::ValidationError(reason)) => {
                warn!(%reason, "User form rejected");
                self.add_dialog.reject(Notice::error(TITLE, reason));
            }
            Err(e) => {
                error!(error = %e, "Error adding user");
                self.add_dialog.fail(Notice::error(TITLE, "Error adding user"));
            }
        }
    }

    /// Opens the edit dialog for a user on the current page, falling back to
    /// the full user list.
    pub async fn open_edit(&mut self, user_id: &str) -> bool {
        let found = match self.rows.iter().find(|u| u.id == user_id) {
            Some(user) => Some(user.clone()),
            None => match self.client.all_users().await {
                Ok(users) => users.into_iter().find(|u| u.id == user_id),
                Err(e) => {
                    error!(error = %e, "Error fetching users");
                    None
                }
            },
        };
        match found {
            Some(user) => {
                self.editing = Some(user);
                self.edit_dialog.open();
                true
            }
            None => {
                self.edit_dialog.reject(Notice::error(TITLE, format!("User {user_id} not found")));
                false
            }
        }
    }

    /// Saves new first and last names for the user being edited.
    #[instrument(skip(self))]
    pub async fn save_edit(&mut self, first_name: &str, last_name: &str) {
        let Some(user) = self.editing.as_ref().map(|u| u.renamed(first_name, last_name)) else {
            return;
        };
        if !self.edit_dialog.begin_submit() {
            return;
        }
        match self.client.update_user(user).await {
            Ok(()) => {
                info!("User updated successfully");
                self.editing = None;
                self.edit_dialog.succeed(Notice::success(TITLE, "User updated successfully"));
                self.refresh().await;
            }
            Err(e) => {
                error!(error = %e, "Error updating user");
                self.edit_dialog.fail(Notice::error(TITLE, "Error updating user"));
            }
        }
    }
}
