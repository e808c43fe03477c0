//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Name ordering uses `COLLATE NOCASE` so it matches the
//! case-insensitive ordering of the in-memory backend.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Brands table
CREATE TABLE IF NOT EXISTS brands (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Categories table (self-referencing hierarchy)
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    alias TEXT NOT NULL UNIQUE,
    image TEXT NOT NULL,
    enabled INTEGER NOT NULL,
    parent_id INTEGER,
    FOREIGN KEY (parent_id) REFERENCES categories(id)
);

-- Products table
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    alias TEXT NOT NULL,
    short_description TEXT NOT NULL,
    full_description TEXT NOT NULL,
    price REAL NOT NULL,
    enabled INTEGER NOT NULL,
    in_stock INTEGER NOT NULL,
    brand_id INTEGER,
    main_image TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (brand_id) REFERENCES brands(id)
);

-- Secondary product images, ordered by position
CREATE TABLE IF NOT EXISTS product_images (
    product_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    PRIMARY KEY (product_id, position),
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

-- Product details, ordered by position
CREATE TABLE IF NOT EXISTS product_details (
    product_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (product_id, position),
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories(parent_id);
CREATE INDEX IF NOT EXISTS idx_products_brand_id ON products(brand_id);
"#;

/// Demo brands, inserted once.
pub const SEED_BRANDS: &str = r#"
INSERT OR IGNORE INTO brands (name) VALUES
    ('Acer'), ('Apple'), ('Canon'), ('Samsung'), ('Sony');
"#;

// Product queries
pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, alias, short_description, full_description, price, enabled, in_stock, brand_id, main_image, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, alias, short_description, full_description, price, enabled, in_stock, brand_id, main_image, created_at, updated_at
FROM products
WHERE id = ?1
"#;

pub const SELECT_ALL_PRODUCTS: &str = r#"
SELECT id, name, alias, short_description, full_description, price, enabled, in_stock, brand_id, main_image, created_at, updated_at
FROM products
ORDER BY id ASC
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = ?2, alias = ?3, short_description = ?4, full_description = ?5, price = ?6,
    enabled = ?7, in_stock = ?8, brand_id = ?9, main_image = ?10, updated_at = ?11
WHERE id = ?1
"#;

pub const UPDATE_PRODUCT_ENABLED: &str = r#"
UPDATE products
SET enabled = ?2
WHERE id = ?1
"#;

pub const DELETE_PRODUCT: &str = r#"
DELETE FROM products
WHERE id = ?1
"#;

pub const SELECT_PRODUCT_IMAGES: &str = r#"
SELECT name
FROM product_images
WHERE product_id = ?1
ORDER BY position ASC
"#;

pub const INSERT_PRODUCT_IMAGE: &str = r#"
INSERT INTO product_images (product_id, position, name)
VALUES (?1, ?2, ?3)
"#;

pub const DELETE_PRODUCT_IMAGES: &str = r#"
DELETE FROM product_images
WHERE product_id = ?1
"#;

pub const SELECT_PRODUCT_DETAILS: &str = r#"
SELECT name, value
FROM product_details
WHERE product_id = ?1
ORDER BY position ASC
"#;

pub const INSERT_PRODUCT_DETAIL: &str = r#"
INSERT INTO product_details (product_id, position, name, value)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const DELETE_PRODUCT_DETAILS: &str = r#"
DELETE FROM product_details
WHERE product_id = ?1
"#;

// Brand queries
pub const SELECT_BRANDS: &str = r#"
SELECT id, name
FROM brands
ORDER BY name ASC
"#;

// Category queries
pub const SELECT_ALL_CATEGORIES: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
ORDER BY id ASC
"#;

pub const SELECT_ROOT_CATEGORIES_ASC: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE parent_id IS NULL
ORDER BY name COLLATE NOCASE ASC
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_ROOT_CATEGORIES_DESC: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE parent_id IS NULL
ORDER BY name COLLATE NOCASE DESC
LIMIT ?1 OFFSET ?2
"#;

pub const COUNT_ROOT_CATEGORIES: &str = r#"
SELECT COUNT(*)
FROM categories
WHERE parent_id IS NULL
"#;

pub const SEARCH_CATEGORIES_ASC: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE name LIKE '%' || ?1 || '%'
ORDER BY name COLLATE NOCASE ASC
LIMIT ?2 OFFSET ?3
"#;

pub const SEARCH_CATEGORIES_DESC: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE name LIKE '%' || ?1 || '%'
ORDER BY name COLLATE NOCASE DESC
LIMIT ?2 OFFSET ?3
"#;

pub const COUNT_SEARCH_CATEGORIES: &str = r#"
SELECT COUNT(*)
FROM categories
WHERE name LIKE '%' || ?1 || '%'
"#;

pub const COUNT_CATEGORY_BY_ID: &str = r#"
SELECT COUNT(*)
FROM categories
WHERE id = ?1
"#;

pub const SELECT_CATEGORY_BY_NAME: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE name = ?1
"#;

pub const SELECT_CATEGORY_BY_ALIAS: &str = r#"
SELECT id, name, alias, image, enabled, parent_id
FROM categories
WHERE alias = ?1
"#;

pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (name, alias, image, enabled, parent_id)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_CATEGORY_ENABLED: &str = r#"
UPDATE categories
SET enabled = ?2
WHERE id = ?1
"#;
