pub(crate) mod category_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod thread_repository;
pub(crate) mod user_repository;
