use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{
    AuthResponseDto, AuthorDto, LoginDto, RegisterDto, UserDto,
};
use crate::presentation::handlers::categories::CategoryDto;
use crate::presentation::handlers::posts::{CreatePostDto, PostDto, PostWithAuthorDto};
use crate::presentation::handlers::threads::{
    CreateThreadDto, ThreadDetailsDto, ThreadDto, ThreadListQuery,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "forum-server", description = "Discussion forum HTTP API"),
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::categories::list_categories,
        crate::presentation::handlers::categories::get_category,
        crate::presentation::handlers::threads::list_threads,
        crate::presentation::handlers::threads::get_thread,
        crate::presentation::handlers::threads::create_thread,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::create_post
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            UserDto,
            AuthorDto,
            CategoryDto,
            CreateThreadDto,
            ThreadListQuery,
            ThreadDto,
            ThreadDetailsDto,
            CreatePostDto,
            PostDto,
            PostWithAuthorDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "categories", description = "Forum sections"),
        (name = "threads", description = "Discussion threads"),
        (name = "posts", description = "Thread replies")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/categories",
            "/api/categories/{slug}",
            "/api/threads",
            "/api/threads/{id}",
            "/api/threads/{threadId}/posts",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components must be present");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
