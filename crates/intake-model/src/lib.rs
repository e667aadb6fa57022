pub mod catalog;
pub mod pattern;
pub mod progress;
pub mod question;
pub mod response;
pub mod session;
pub mod status;
