pub(crate) mod category;
pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod thread;
pub(crate) mod user;
pub(crate) mod validation;
