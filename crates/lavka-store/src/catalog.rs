// SPDX-License-Identifier: Apache-2.0

use crate::{Store, StoreError};
use lavka_model::{
    OrderId, Product, ProductId, StockStatus, WarehouseItem, WarehouseItemId,
};
use rusqlite::{params, OptionalExtension, Row};

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, available, image_urls, color, size";

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let image_urls_raw: String = row.get(5)?;
    let image_urls: Vec<String> = serde_json::from_str(&image_urls_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Product {
        id: ProductId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        available: row.get(4)?,
        image_urls,
        color: row.get(6)?,
        size: row.get(7)?,
    })
}

fn warehouse_item_from_row(row: &Row<'_>) -> rusqlite::Result<WarehouseItem> {
    let status_raw: String = row.get(4)?;
    Ok(WarehouseItem {
        id: WarehouseItemId(row.get(0)?),
        product_id: ProductId(row.get(1)?),
        color: row.get(2)?,
        size: row.get(3)?,
        status: StockStatus::parse(&status_raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        order_id: row.get::<_, Option<i64>>(5)?.map(OrderId),
    })
}

impl Store {
    /// Catalog listing: available products in storage order.
    pub async fn list_available_products(&self) -> Result<Vec<Product>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE available = 1 ORDER BY id"
            ))?;
            let products = stmt
                .query_map([], product_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(products)
        })
        .await
    }

    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.with_conn(move |conn| {
            let product = conn
                .query_row(
                    &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
                    params![id.0],
                    product_from_row,
                )
                .optional()?;
            Ok(product)
        })
        .await
    }

    /// Inventory-management path (seeding, admin tooling, tests).
    pub async fn insert_product(&self, product: Product) -> Result<ProductId, StoreError> {
        self.with_conn(move |conn| {
            let image_urls = serde_json::to_string(&product.image_urls)
                .map_err(|e| StoreError(e.to_string()))?;
            conn.execute(
                "INSERT INTO products (name, description, price_cents, available, image_urls, color, size)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    product.name,
                    product.description,
                    product.price,
                    product.available,
                    image_urls,
                    product.color,
                    product.size
                ],
            )?;
            Ok(ProductId(conn.last_insert_rowid()))
        })
        .await
    }

    pub async fn insert_warehouse_item(
        &self,
        product_id: ProductId,
        color: String,
        size: String,
        status: StockStatus,
    ) -> Result<WarehouseItemId, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO warehouse_items (product_id, color, size, status)
                 VALUES (?1, ?2, ?3, ?4)",
                params![product_id.0, color, size, status.as_str()],
            )?;
            Ok(WarehouseItemId(conn.last_insert_rowid()))
        })
        .await
    }

    pub async fn warehouse_item(
        &self,
        id: WarehouseItemId,
    ) -> Result<Option<WarehouseItem>, StoreError> {
        self.with_conn(move |conn| {
            let item = conn
                .query_row(
                    "SELECT id, product_id, color, size, status, order_id
                     FROM warehouse_items WHERE id = ?1",
                    params![id.0],
                    warehouse_item_from_row,
                )
                .optional()?;
            Ok(item)
        })
        .await
    }

    pub async fn warehouse_items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<WarehouseItem>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, product_id, color, size, status, order_id
                 FROM warehouse_items WHERE order_id = ?1 ORDER BY id",
            )?;
            let items = stmt
                .query_map(params![order_id.0], warehouse_item_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
    }

    pub async fn count_in_stock(&self, product_id: ProductId) -> Result<u64, StoreError> {
        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM warehouse_items WHERE product_id = ?1 AND status = 'IN_STOCK'",
                params![product_id.0],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
    }
}
