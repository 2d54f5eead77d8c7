// SPDX-License-Identifier: Apache-2.0

use crate::{Store, StoreError};
use lavka_model::{Basket, BasketId, BasketItem, BasketItemId, ProductId, UserId};
use rusqlite::{params, OptionalExtension, Row};

pub(crate) fn basket_item_from_row(row: &Row<'_>) -> rusqlite::Result<BasketItem> {
    Ok(BasketItem {
        id: BasketItemId(row.get(0)?),
        basket_id: BasketId(row.get(1)?),
        product_id: ProductId(row.get(2)?),
        color: row.get(3)?,
        size: row.get(4)?,
        quantity: row.get(5)?,
    })
}

impl Store {
    pub async fn create_basket(&self, user_id: UserId) -> Result<Basket, StoreError> {
        self.with_conn(move |conn| {
            conn.execute("INSERT INTO baskets (user_id) VALUES (?1)", params![user_id.0])?;
            Ok(Basket {
                id: BasketId(conn.last_insert_rowid()),
                user_id,
            })
        })
        .await
    }

    pub async fn basket(&self, id: BasketId) -> Result<Option<Basket>, StoreError> {
        self.with_conn(move |conn| {
            let basket = conn
                .query_row(
                    "SELECT id, user_id FROM baskets WHERE id = ?1",
                    params![id.0],
                    |row| {
                        Ok(Basket {
                            id: BasketId(row.get(0)?),
                            user_id: UserId(row.get(1)?),
                        })
                    },
                )
                .optional()?;
            Ok(basket)
        })
        .await
    }

    pub async fn add_basket_item(
        &self,
        basket_id: BasketId,
        product_id: ProductId,
        color: String,
        size: String,
        quantity: u32,
    ) -> Result<BasketItemId, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO basket_items (basket_id, product_id, color, size, quantity)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![basket_id.0, product_id.0, color, size, quantity],
            )?;
            Ok(BasketItemId(conn.last_insert_rowid()))
        })
        .await
    }

    pub async fn basket_items(&self, basket_id: BasketId) -> Result<Vec<BasketItem>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, basket_id, product_id, color, size, quantity
                 FROM basket_items WHERE basket_id = ?1 ORDER BY id",
            )?;
            let items = stmt
                .query_map(params![basket_id.0], basket_item_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
    }
}
