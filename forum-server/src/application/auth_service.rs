use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

/// Account registration, login and session lookup for the write endpoints.
pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    // verified against on unknown usernames so both paths cost one argon2 run
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    pub(crate) fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;
        let password_hash = hash_password(&req.password)?;

        let user = self
            .repo
            .create_user(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;
        info!(user_id = user.id, "user registered");

        self.issue_session(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let Some(credentials) = self.repo.find_by_username(&req.username).await? else {
            match verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                Ok(()) | Err(DomainError::InvalidCredentials) => {}
                Err(err) => return Err(err),
            }
            return Err(DomainError::InvalidCredentials);
        };

        verify_password(&req.password, &credentials.password_hash)?;
        self.issue_session(credentials.user)
    }

    pub(crate) async fn current_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }

    fn issue_session(&self, user: User) -> Result<AuthResult, DomainError> {
        let access_token = self
            .jwt
            .issue(user.id, &user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult { user, access_token })
    }
}

pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2()?
        .hash_password(raw_password.as_bytes(), &salt)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(password_hash.to_string())
}

fn verify_password(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|err| DomainError::Unexpected(err.to_string()))?;
    argon2()?
        .verify_password(raw_password.as_bytes(), &parsed_hash)
        .map_err(|err| match err {
            PasswordHashError::Password => DomainError::InvalidCredentials,
            _ => DomainError::Unexpected(err.to_string()),
        })
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params = Params::new(19 * 1024, 2, 1, None)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
