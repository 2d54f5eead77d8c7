// SPDX-License-Identifier: Apache-2.0

//! The basket-to-order transition. The only multi-step state change in
//! the system, so it runs inside a single transaction: either the order
//! exists, the matched units are sold, and the basket is gone, or
//! nothing happened.

use crate::baskets::basket_item_from_row;
use crate::{now_unix, Store, StoreError};
use lavka_model::{BasketId, BasketItem, Order, OrderDraft, OrderId, UserId};
use rusqlite::{params, OptionalExtension, Row};
use std::fmt::{Display, Formatter};
use tracing::{debug, info};

#[derive(Debug)]
#[non_exhaustive]
pub enum CheckoutError {
    BasketNotFound,
    NotBasketOwner,
    EmptyBasket,
    Storage(StoreError),
}

impl Display for CheckoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BasketNotFound => f.write_str("basket does not exist"),
            Self::NotBasketOwner => f.write_str("basket belongs to another user"),
            Self::EmptyBasket => f.write_str("basket has no items"),
            Self::Storage(err) => write!(f, "checkout storage failure: {err}"),
        }
    }
}

impl std::error::Error for CheckoutError {}

impl From<StoreError> for CheckoutError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err)
    }
}

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: OrderId(row.get(0)?),
        user_id: UserId(row.get(1)?),
        full_name: row.get(2)?,
        phone: row.get(3)?,
        settlement: row.get(4)?,
        warehouse_address: row.get(5)?,
        comment: row.get(6)?,
        created_at_unix: row.get(7)?,
    })
}

impl Store {
    /// Converts `basket_id` into an order on behalf of `user_id`.
    ///
    /// Per basket line, exactly one `IN_STOCK` unit with identical
    /// (product, color, size) flips to `SOLD` — first match by rowid,
    /// quantity ignored. A line with no matching unit is skipped without
    /// failing the checkout; the caller sees a created order either way.
    pub async fn checkout(
        &self,
        basket_id: BasketId,
        user_id: UserId,
        draft: OrderDraft,
    ) -> Result<OrderId, CheckoutError> {
        let order_id = self
            .with_conn(move |conn| {
                let tx = conn.transaction()?;

                let owner: Option<i64> = tx
                    .query_row(
                        "SELECT user_id FROM baskets WHERE id = ?1",
                        params![basket_id.0],
                        |row| row.get(0),
                    )
                    .optional()?;
                let Some(owner) = owner else {
                    return Ok(Err(CheckoutError::BasketNotFound));
                };
                if owner != user_id.0 {
                    return Ok(Err(CheckoutError::NotBasketOwner));
                }

                let items: Vec<BasketItem> = {
                    let mut stmt = tx.prepare(
                        "SELECT id, basket_id, product_id, color, size, quantity
                         FROM basket_items WHERE basket_id = ?1 ORDER BY id",
                    )?;
                    let rows = stmt.query_map(params![basket_id.0], basket_item_from_row)?;
                    rows.collect::<Result<Vec<_>, _>>()?
                };
                if items.is_empty() {
                    return Ok(Err(CheckoutError::EmptyBasket));
                }

                tx.execute(
                    "INSERT INTO orders (user_id, full_name, phone, settlement, warehouse_address, comment, created_at_unix)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        user_id.0,
                        draft.full_name,
                        draft.phone,
                        draft.settlement,
                        draft.warehouse_address,
                        draft.comment,
                        now_unix()
                    ],
                )?;
                let order_id = OrderId(tx.last_insert_rowid());

                for item in &items {
                    let unit: Option<i64> = tx
                        .query_row(
                            "SELECT id FROM warehouse_items
                             WHERE product_id = ?1 AND color = ?2 AND size = ?3 AND status = 'IN_STOCK'
                             ORDER BY id LIMIT 1",
                            params![item.product_id.0, item.color, item.size],
                            |row| row.get(0),
                        )
                        .optional()?;
                    match unit {
                        Some(unit_id) => {
                            tx.execute(
                                "UPDATE warehouse_items SET status = 'SOLD', order_id = ?1 WHERE id = ?2",
                                params![order_id.0, unit_id],
                            )?;
                        }
                        None => {
                            debug!(
                                product_id = item.product_id.0,
                                color = %item.color,
                                size = %item.size,
                                "no matching stock for basket line, skipped"
                            );
                        }
                    }
                }

                tx.execute("DELETE FROM baskets WHERE id = ?1", params![basket_id.0])?;
                tx.commit()?;
                Ok(Ok(order_id))
            })
            .await??;
        info!(order_id = order_id.0, basket_id = basket_id.0, "order created");
        Ok(order_id)
    }

    pub async fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        self.with_conn(move |conn| {
            let order = conn
                .query_row(
                    "SELECT id, user_id, full_name, phone, settlement, warehouse_address, comment, created_at_unix
                     FROM orders WHERE id = ?1",
                    params![id.0],
                    order_from_row,
                )
                .optional()?;
            Ok(order)
        })
        .await
    }

    pub async fn order_count(&self) -> Result<u64, StoreError> {
        self.with_conn(move |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}
