pub(crate) mod catalogs;
pub(crate) mod error;
pub(crate) mod sessions;
pub(crate) mod status;
