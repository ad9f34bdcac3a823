pub mod approvals;
pub mod courses;
pub mod home;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod records;
