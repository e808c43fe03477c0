//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use shopme_core::catalog::{Brand, Category, Product, ProductDetail};

/// Convert a SQLite row to a Product without its images and details.
///
/// Expected columns: id, name, alias, short_description, full_description,
/// price, enabled, in_stock, brand_id, main_image, created_at, updated_at
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;

    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        alias: row.get(2)?,
        short_description: row.get(3)?,
        full_description: row.get(4)?,
        price: row.get(5)?,
        enabled: row.get(6)?,
        in_stock: row.get(7)?,
        brand_id: row.get(8)?,
        main_image: row.get(9)?,
        extra_images: Vec::new(),
        details: Vec::new(),
        created_at: parse_datetime(10, &created_at)?,
        updated_at: parse_datetime(11, &updated_at)?,
    })
}

/// Convert a SQLite row to a ProductDetail.
///
/// Expected columns: name, value
pub fn row_to_detail(row: &Row) -> rusqlite::Result<ProductDetail> {
    Ok(ProductDetail {
        name: row.get(0)?,
        value: row.get(1)?,
    })
}

/// Convert a SQLite row to a Brand.
///
/// Expected columns: id, name
pub fn row_to_brand(row: &Row) -> rusqlite::Result<Brand> {
    Ok(Brand {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Convert a SQLite row to a Category.
///
/// Expected columns: id, name, alias, image, enabled, parent_id
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        alias: row.get(2)?,
        image: row.get(3)?,
        enabled: row.get(4)?,
        parent_id: row.get(5)?,
    })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_format_is_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2024-06-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let formatted = format_datetime(&dt);

        assert!(formatted.starts_with("2024-06-15T10:30:00"));
        assert_eq!(parse_datetime(0, &formatted).unwrap(), dt);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        let result = parse_datetime(10, "yesterday");
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(10, _, _))
        ));
    }
}
