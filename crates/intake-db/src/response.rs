pub mod mutation;
pub mod query;

pub use mutation::{Mutation, SubmitError};
pub use query::Query;
