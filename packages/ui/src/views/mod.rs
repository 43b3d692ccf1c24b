mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod dashboard;
pub use dashboard::DashboardView;

mod users;
pub use users::UsersView;

mod user_form;
pub use user_form::UserFormView;

mod user_config;
pub use user_config::UserConfigView;

mod logs;
pub use logs::LogsView;
