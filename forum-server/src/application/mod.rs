pub(crate) mod auth_service;
pub(crate) mod forum_service;
