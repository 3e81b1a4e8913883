//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::auth::{
    errors::AuthServiceError,
    models::{Identity, IssuedSession, NewUser, SessionUuid, User, UserUuid},
    repository::PgAuthRepository,
    token::{
        digest_password, digest_token, generate_salt, generate_session_token, verify_password,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn start_session(&self) -> Result<IssuedSession, AuthServiceError> {
        let token = generate_session_token();

        let session = self
            .repository
            .create_session(SessionUuid::new(), &digest_token(&token))
            .await?;

        Ok(IssuedSession { token, session })
    }

    async fn register(&self, user: NewUser) -> Result<User, AuthServiceError> {
        let salt = generate_salt();
        let digest = digest_password(&salt, &user.password);

        self.repository
            .create_user(UserUuid::new(), &user.email, &salt, &digest)
            .await
            .map_err(Into::into)
    }

    async fn login(
        &self,
        session: SessionUuid,
        email: &str,
        password: &str,
    ) -> Result<User, AuthServiceError> {
        // Unknown email and wrong password answer identically.
        let credentials = self
            .repository
            .find_credentials_by_email(email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(
            &credentials.password_salt,
            &credentials.password_digest,
            password,
        ) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let rows_affected = self
            .repository
            .bind_session_to_user(session, credentials.uuid)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        Ok(User {
            uuid: credentials.uuid,
            email: credentials.email,
            created_at: credentials.created_at,
            updated_at: credentials.updated_at,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Identity, AuthServiceError> {
        let session = self
            .repository
            .find_session_by_token_digest(&digest_token(token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(Identity {
            session: session.uuid,
            user: session.user_uuid,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issues a fresh guest session; the raw token is returned exactly once.
    async fn start_session(&self) -> Result<IssuedSession, AuthServiceError>;

    /// Creates a shopper account.
    async fn register(&self, user: NewUser) -> Result<User, AuthServiceError>;

    /// Verifies credentials and binds the session to the user.
    async fn login(
        &self,
        session: SessionUuid,
        email: &str,
        password: &str,
    ) -> Result<User, AuthServiceError>;

    /// Resolves a bearer token to its session identity.
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthServiceError>;
}
