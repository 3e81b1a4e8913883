//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::carts::models::{CartOwner, CartRecord, CartUuid};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const FIND_CART_FOR_UPDATE_SQL: &str = include_str!("../sql/find_cart_for_update.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(owner.user_uuid())
            .bind(owner.session_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Like [`find_cart`](Self::find_cart) but takes a row lock.
    ///
    /// All cart mutations go through this lock so that concurrent adds,
    /// merges, and checkouts against the same cart serialize.
    pub(crate) async fn find_cart_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_FOR_UPDATE_SQL)
            .bind(owner.user_uuid())
            .bind(owner.session_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Inserts a cart row for the owner.
    ///
    /// Returns `None` when the owner already has a cart — a concurrent
    /// request won the creation race and its row should be re-read.
    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        owner: CartOwner,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(owner.user_uuid())
            .bind(owner.session_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_uuid: Option<Uuid> = row.try_get("user_uuid")?;
        let session_uuid: Option<Uuid> = row.try_get("session_uuid")?;

        let owner = match (user_uuid, session_uuid) {
            (Some(user), None) => CartOwner::User(user.into()),
            (None, Some(session)) => CartOwner::Session(session.into()),
            // The schema CHECK forbids these; decoding them is a bug.
            (Some(_), Some(_)) | (None, None) => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "user_uuid".to_string(),
                    source: "cart must have exactly one owner".into(),
                });
            }
        };

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
