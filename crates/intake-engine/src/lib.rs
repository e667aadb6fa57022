pub mod conditional;
pub mod error;
pub mod oracle;
pub mod pattern;
pub mod progress;
pub mod selector;
pub mod session;
pub mod status;
