// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rusqlite::Connection;

/// Idempotent schema bootstrap. `orders` is created before
/// `warehouse_items` so the order-link foreign key resolves.
pub(crate) fn init(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            password_hash TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price_cents INTEGER NOT NULL,
            available INTEGER NOT NULL DEFAULT 1,
            image_urls TEXT NOT NULL DEFAULT '[]',
            color TEXT NOT NULL DEFAULT '',
            size TEXT NOT NULL DEFAULT ''
        );
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            full_name TEXT NOT NULL,
            phone TEXT NOT NULL,
            settlement TEXT NOT NULL,
            warehouse_address TEXT NOT NULL,
            comment TEXT,
            created_at_unix INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS warehouse_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id),
            color TEXT NOT NULL,
            size TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'IN_STOCK',
            order_id INTEGER REFERENCES orders(id)
        );
        CREATE INDEX IF NOT EXISTS idx_warehouse_items_match
            ON warehouse_items(product_id, color, size, status);
        CREATE TABLE IF NOT EXISTS baskets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id)
        );
        CREATE TABLE IF NOT EXISTS basket_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            basket_id INTEGER NOT NULL REFERENCES baskets(id) ON DELETE CASCADE,
            product_id INTEGER NOT NULL REFERENCES products(id),
            color TEXT NOT NULL,
            size TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1
        );",
    )?;
    Ok(())
}
