//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use trolley::pricing::CartTotals;

use crate::domain::{
    carts::models::CartOwner,
    orders::models::{Order, OrderLine, OrderUuid},
    products::{
        models::ProductUuid,
        repository::{try_get_amount, try_into_db_amount},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: CartOwner,
        totals: CartTotals,
    ) -> Result<Timestamp, sqlx::Error> {
        let placed_at: SqlxTimestamp = sqlx::query_scalar(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(owner.user_uuid())
            .bind(owner.session_uuid())
            .bind(try_into_db_amount(totals.subtotal, "subtotal")?)
            .bind(try_into_db_amount(totals.tax, "tax")?)
            .bind(try_into_db_amount(totals.shipping, "shipping")?)
            .bind(try_into_db_amount(totals.grand_total, "grand_total")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(placed_at.to_jiff())
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &OrderLine,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_LINE_SQL)
            .bind(Uuid::now_v7())
            .bind(order.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(&line.name)
            .bind(&line.sku)
            .bind(try_into_db_amount(line.unit_price, "unit_price")?)
            .bind(i64::from(line.quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_uuid: Option<Uuid> = row.try_get("user_uuid")?;
        let session_uuid: Option<Uuid> = row.try_get("session_uuid")?;

        let owner = match (user_uuid, session_uuid) {
            (Some(user), None) => CartOwner::User(user.into()),
            (None, Some(session)) => CartOwner::Session(session.into()),
            (Some(_), Some(_)) | (None, None) => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "user_uuid".to_string(),
                    source: "order must have exactly one owner".into(),
                });
            }
        };

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            owner,
            lines: Vec::new(),
            totals: CartTotals {
                subtotal: try_get_amount(row, "subtotal")?,
                tax: try_get_amount(row, "tax")?,
                shipping: try_get_amount(row, "shipping")?,
                grand_total: try_get_amount(row, "grand_total")?,
            },
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price = try_get_amount(row, "unit_price")?;

        let quantity_i64: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            unit_price,
            quantity,
        })
    }
}
