pub mod client;
pub mod response;
pub mod session;
pub mod util;

pub use sea_orm;
