mod startup;
pub use startup::DatabaseGate;

mod login;
pub use login::Login;

mod protected_layout;
pub use protected_layout::ProtectedLayout;

mod dashboard;
pub use dashboard::Dashboard;

mod users;
pub use users::Users;

mod logs;
pub use logs::Logs;

mod not_found;
pub use not_found::NotFound;
