pub mod admin_details;
pub mod dashboard;
pub mod history_log;
pub mod icons;
pub mod not_found;
pub mod shell;

pub use admin_details::AdminDetailsPage;
pub use dashboard::DashboardPage;
pub use history_log::HistoryLogPage;
pub use not_found::NotFoundPage;
