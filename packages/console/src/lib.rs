//! Platform-agnostic logic behind the admin console screens.
//!
//! Nothing here renders. The UI crate owns signals and components; this crate
//! owns the decisions: who is signed in, which screen the guard allows, what a
//! failed fetch turns into, and how a client's launcher script is written.

pub mod artifacts;
pub mod dashboard;
pub mod dates;
pub mod form;
pub mod guard;
pub mod listing;
pub mod logs;
pub mod session;
pub mod startup;
pub mod users;

pub use artifacts::{mask_secret, Artifact, ConfigArtifacts, ScriptKind};
pub use dashboard::{load_dashboard, recent_logs, DashboardData, DashboardSummary};
pub use form::{
    submit_user_form, validate, validate_login, FormMode, SubmitOutcome, UserFormState,
    ValidationError,
};
pub use guard::{
    fallback_path, login_error, login_redirect, sanitize_return_to, show_login_form, GuardDecision,
    GuardState, RouteGuard,
};
pub use listing::{describe_error, Listing};
pub use logs::{load_logs, visible_logs, LogFilter, StatusCounts, StatusTone};
pub use session::{Session, SessionManager, SessionStore, SharedSession};
pub use startup::{check_database, InitStatus};
pub use users::{delete_confirmed, load_client_config, load_users, send_delete, UserList};
