pub mod args;
pub mod id_map;
pub mod loader;
pub mod net;
pub mod tracing;
