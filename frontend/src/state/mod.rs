pub mod notices;
pub mod session;
pub mod unread;
