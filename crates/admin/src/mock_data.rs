//! Demo data for a fresh store.

use shopme_core::catalog::{Brand, NewCategory};
use shopme_core::storage::{CategoryRepository, Result};

/// Brands offered in the product form when running in memory.
#[cfg(any(test, not(feature = "sqlite")))]
pub fn demo_brands() -> Vec<Brand> {
    ["Acer", "Apple", "Canon", "Samsung", "Sony"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Brand::new(id, name))
        .collect()
}

/// Category tree as `(name, alias, children)`.
const DEMO_CATEGORIES: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Electronics",
        "electronics",
        &[
            ("Cameras", "cameras"),
            ("Smartphones", "smartphones"),
            ("Headphones", "headphones"),
        ],
    ),
    (
        "Computers",
        "computers",
        &[("Laptops", "laptops"), ("Desktops", "desktops"), ("Tablets", "tablets")],
    ),
    ("Books", "books", &[("Novels", "novels"), ("Comics", "comics")]),
    ("Home Appliances", "home-appliances", &[("Kitchen", "kitchen")]),
    ("Sports", "sports", &[]),
];

/// Inserts the demo categories when the store has none.
pub async fn seed_categories(repo: &dyn CategoryRepository) -> Result<()> {
    if !repo.list_categories().await?.is_empty() {
        return Ok(());
    }

    let mut count = 0;
    for (name, alias, children) in DEMO_CATEGORIES {
        let parent = repo.create_category(&NewCategory::new(*name, *alias)).await?;
        count += 1;
        for (child_name, child_alias) in *children {
            repo.create_category(&NewCategory::new(*child_name, *child_alias).with_parent(parent.id))
                .await?;
            count += 1;
        }
    }

    tracing::info!(count, "Seeded demo categories");
    Ok(())
}
