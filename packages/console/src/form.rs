//! Create/edit form for client accounts, and the login form's local checks.

use api::{AdminApi, ApiError, User, UserForm};
use thiserror::Error;

use crate::listing::NETWORK_ERROR;

pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATE_FAILED: &str = "Failed to update user";

/// A form that cannot be submitted as filled in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter both username and password")]
    MissingCredentials,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(User),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add New User",
            FormMode::Edit(_) => "Edit User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create User",
            FormMode::Edit(_) => "Update User",
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            FormMode::Create => CREATE_FAILED,
            FormMode::Edit(_) => UPDATE_FAILED,
        }
    }
}

/// Check the required fields. The database password may stay empty on edit,
/// which keeps the stored one.
pub fn validate(mode: &FormMode, form: &UserForm) -> Result<(), ValidationError> {
    if form.db_name.trim().is_empty() {
        return Err(ValidationError::Required("Database name"));
    }
    if form.db_user.trim().is_empty() {
        return Err(ValidationError::Required("Database user"));
    }
    if matches!(mode, FormMode::Create) && form.db_password.is_empty() {
        return Err(ValidationError::Required("Database password"));
    }
    Ok(())
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// What the server handed back after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created {
        client_id: String,
        access_token: String,
    },
    Updated {
        access_token: Option<String>,
    },
}

impl SubmitOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Created {
                client_id,
                access_token,
            } => format!(
                "User created successfully! Client ID: {client_id}, Access Token: {access_token}"
            ),
            SubmitOutcome::Updated {
                access_token: Some(token),
            } => format!("User updated successfully! New access token: {token}"),
            SubmitOutcome::Updated { access_token: None } => {
                "User updated successfully!".to_string()
            }
        }
    }
}

/// Send the form to the server. Errors are already worded for the operator.
pub async fn submit_user_form(
    api: &impl AdminApi,
    mode: &FormMode,
    form: &UserForm,
) -> Result<SubmitOutcome, String> {
    let result = match mode {
        FormMode::Create => match api.create_user(form).await {
            Ok(resp) => resp.into_result().map(|(client_id, access_token)| {
                tracing::info!(%client_id, "client created");
                SubmitOutcome::Created {
                    client_id,
                    access_token,
                }
            }),
            Err(err) => Err(err),
        },
        FormMode::Edit(user) => match api.update_user(&user.client_id, form).await {
            Ok(resp) => resp.into_result().map(|access_token| {
                tracing::info!(client_id = %user.client_id, "client updated");
                SubmitOutcome::Updated { access_token }
            }),
            Err(err) => Err(err),
        },
    };
    result.map_err(|err| submit_failure(mode, &err))
}

fn submit_failure(mode: &FormMode, err: &ApiError) -> String {
    tracing::warn!("{}: {err}", mode.failure());
    if err.is_transport() {
        return NETWORK_ERROR.to_string();
    }
    err.server_message().unwrap_or(mode.failure()).to_string()
}

/// Everything the form view keeps between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFormState {
    pub mode: FormMode,
    pub form: UserForm,
    pub submitting: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl UserFormState {
    pub fn new(mode: FormMode) -> Self {
        let form = match &mode {
            FormMode::Create => UserForm::default(),
            FormMode::Edit(user) => UserForm::from_user(user),
        };
        Self {
            mode,
            form,
            submitting: false,
            error: None,
            success: None,
        }
    }

    /// Validate and mark the form in flight.
    ///
    /// Returns `false` when a submit is already running or validation
    /// failed, in which case no request may be sent.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.success = None;
        if let Err(err) = validate(&self.mode, &self.form) {
            self.error = Some(err.to_string());
            return false;
        }
        self.error = None;
        self.submitting = true;
        true
    }

    /// Record the server's answer. Returns `true` when the account was
    /// saved, at which point the user list is stale and must be re-fetched.
    pub fn finish_submit(&mut self, result: Result<SubmitOutcome, String>) -> bool {
        self.submitting = false;
        match result {
            Ok(outcome) => {
                self.success = Some(outcome.message());
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    pub fn succeeded(&self) -> bool {
        self.success.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    fn filled(db_password: &str) -> UserForm {
        UserForm {
            db_name: "shop".to_string(),
            db_user: "sa".to_string(),
            db_password: db_password.to_string(),
            client_name: "Corner Shop".to_string(),
            ..Default::default()
        }
    }

    fn existing() -> User {
        User {
            client_id: "C7".to_string(),
            db_name: "shop".to_string(),
            db_user: "sa".to_string(),
            created_at: None,
            client_name: None,
            address: None,
            phone_number: None,
            username: None,
            password: None,
        }
    }

    #[test]
    fn test_validation_rules() {
        assert_eq!(
            validate(&FormMode::Create, &UserForm::default()),
            Err(ValidationError::Required("Database name"))
        );
        assert_eq!(
            validate(&FormMode::Create, &filled("")).unwrap_err().to_string(),
            "Database password is required"
        );
        assert!(validate(&FormMode::Edit(existing()), &filled("")).is_ok());
        assert!(validate(&FormMode::Create, &filled("pw")).is_ok());
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(
            validate_login("root", "").unwrap_err().to_string(),
            "Please enter both username and password"
        );
        assert!(validate_login("  ", "pw").is_err());
        assert!(validate_login("root", "pw").is_ok());
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let mut state = UserFormState::new(FormMode::Create);
        assert!(!state.begin_submit());
        assert!(!state.submitting);
        assert_eq!(state.error.as_deref(), Some("Database name is required"));
    }

    #[test]
    fn test_double_submit_is_blocked() {
        let mut state = UserFormState::new(FormMode::Create);
        state.form = filled("pw");
        assert!(state.begin_submit());
        assert!(!state.begin_submit());
        assert!(!state.finish_submit(Err("boom".into())));
        assert!(!state.submitting);
        assert!(state.begin_submit());
    }

    #[test]
    fn test_edit_prefills_without_passwords() {
        let state = UserFormState::new(FormMode::Edit(existing()));
        assert_eq!(state.form.db_name, "shop");
        assert!(state.form.db_password.is_empty());
        assert_eq!(state.mode.title(), "Edit User");
    }

    #[tokio::test]
    async fn test_create_reports_id_and_token() {
        let backend = MemoryBackend::new();
        let outcome = submit_user_form(&backend, &FormMode::Create, &filled("pw"))
            .await
            .unwrap();
        assert_eq!(
            outcome.message(),
            "User created successfully! Client ID: CLIENT0001, Access Token: token-0001"
        );
        assert_eq!(backend.users().len(), 1);
    }

    #[tokio::test]
    async fn test_update_reports_new_token() {
        let backend = MemoryBackend::new().with_user(existing(), "old");
        let outcome = submit_user_form(&backend, &FormMode::Edit(existing()), &filled(""))
            .await
            .unwrap();
        assert_eq!(
            outcome.message(),
            "User updated successfully! New access token: token-0001"
        );
        assert_eq!(backend.requests(), vec!["PUT /api/admin/update-users/C7"]);
    }

    #[tokio::test]
    async fn test_saved_form_asks_for_a_fresh_list() {
        let backend = MemoryBackend::new();
        let mut state = UserFormState::new(FormMode::Create);
        state.form = filled("pw");
        assert!(state.begin_submit());

        let result = submit_user_form(&backend, &state.mode, &state.form).await;
        assert!(state.finish_submit(result));
        assert!(state.succeeded());

        let refreshed = crate::users::load_users(&backend).await;
        assert_eq!(refreshed.items.len(), 1);
        assert_eq!(refreshed.items[0].client_id, "CLIENT0001");
    }

    #[tokio::test]
    async fn test_submit_failures() {
        let backend = MemoryBackend::new();
        submit_user_form(&backend, &FormMode::Create, &filled("pw"))
            .await
            .unwrap();
        let duplicate = submit_user_form(&backend, &FormMode::Create, &filled("pw")).await;
        assert_eq!(
            duplicate.unwrap_err(),
            "Database shop is already registered"
        );

        let missing = submit_user_form(&backend, &FormMode::Edit(existing()), &filled("")).await;
        assert_eq!(missing.unwrap_err(), "Client not found");

        backend.set_offline(true);
        let offline = submit_user_form(&backend, &FormMode::Create, &filled("pw")).await;
        assert_eq!(offline.unwrap_err(), NETWORK_ERROR);
    }
}
