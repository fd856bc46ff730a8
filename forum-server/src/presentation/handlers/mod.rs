pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod threads;
