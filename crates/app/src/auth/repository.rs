//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::models::{Session, SessionUuid, User, UserCredentials, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_CREDENTIALS_SQL: &str = include_str!("sql/find_user_credentials.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const BIND_SESSION_SQL: &str = include_str!("sql/bind_session.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(
        &self,
        user: UserUuid,
        email: &str,
        password_salt: &str,
        password_digest: &str,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(email)
            .bind(password_salt)
            .bind(password_digest)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_CREDENTIALS_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_session(
        &self,
        session: SessionUuid,
        token_digest: &str,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Postgres, Session>(CREATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(token_digest)
            .fetch_one(&self.pool)
            .await
    }

    /// Resolves a token digest to its session, bumping `last_seen_at`.
    pub(crate) async fn find_session_by_token_digest(
        &self,
        token_digest: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        query_as::<Postgres, Session>(TOUCH_SESSION_SQL)
            .bind(token_digest)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn bind_session_to_user(
        &self,
        session: SessionUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(BIND_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(user.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            password_salt: row.try_get("password_salt")?,
            password_digest: row.try_get("password_digest")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Session {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row.try_get::<Option<Uuid>, _>("user_uuid")?.map(Into::into),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_seen_at: row.try_get::<SqlxTimestamp, _>("last_seen_at")?.to_jiff(),
        })
    }
}
