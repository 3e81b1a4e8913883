//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use trolley_app::{auth::models::Identity, domain::carts::models::CartOwner};

const IDENTITY_DEPOT_KEY: &str = "shopper_identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Stores the authenticated shopper identity for downstream handlers.
    fn insert_identity(&mut self, identity: Identity);

    /// The shopper identity injected by the auth middleware.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.insert(IDENTITY_DEPOT_KEY, identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.get::<Identity>(IDENTITY_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing session"))
    }
}

/// Cart-ownership view of a shopper identity.
pub(crate) trait IdentityExt {
    /// The cart this identity shops with: the user's cart once logged in,
    /// the session cart while a guest.
    fn cart_owner(&self) -> CartOwner;
}

impl IdentityExt for Identity {
    fn cart_owner(&self) -> CartOwner {
        match self.user {
            Some(user) => CartOwner::User(user),
            None => CartOwner::Session(self.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use trolley_app::auth::models::{SessionUuid, UserUuid};

    use super::*;

    #[test]
    fn guest_identity_owns_session_cart() {
        let session = SessionUuid::new();

        let identity = Identity {
            session,
            user: None,
        };

        assert_eq!(identity.cart_owner(), CartOwner::Session(session));
    }

    #[test]
    fn logged_in_identity_owns_user_cart() {
        let user = UserUuid::new();

        let identity = Identity {
            session: SessionUuid::new(),
            user: Some(user),
        };

        assert_eq!(identity.cart_owner(), CartOwner::User(user));
    }
}
