//! Auth data models.

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// A registered shopper account.
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// A bearer session. `user_uuid` is `None` while the shopper is a guest and
/// is filled in at login.
#[derive(Debug, Clone)]
pub struct Session {
    pub uuid: SessionUuid,
    pub user_uuid: Option<UserUuid>,
    pub created_at: Timestamp,
    pub last_seen_at: Timestamp,
}

/// The identity a bearer token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub session: SessionUuid,
    pub user: Option<UserUuid>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}

/// Stored credential material used during login verification.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub email: String,
    pub password_salt: String,
    pub password_digest: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
