use std::collections::HashSet;

use crate::storage::SortDir;

use super::types::{Category, CategoryId};

/// A category as shown in the hierarchical listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category: Category,
    /// Name prefixed with `--` once per level below the root.
    pub display_name: String,
    pub depth: usize,
}

/// Outcome of the category name/alias uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    Ok,
    DuplicateName,
    DuplicateAlias,
}

impl Uniqueness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Uniqueness::Ok => "OK",
            Uniqueness::DuplicateName => "DuplicateName",
            Uniqueness::DuplicateAlias => "DuplicateAlias",
        }
    }
}

/// Word used in flash messages for an enabled flag.
pub fn status_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// Sorts categories by name in the given direction.
pub fn sort_categories_by_name(categories: &mut [Category], sort: SortDir) {
    categories.sort_by(|a, b| {
        let ordering = a.name.to_lowercase().cmp(&b.name.to_lowercase());
        match sort {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });
}

/// Expands each root into itself followed by its descendants, depth first.
///
/// `all` must contain every category that may appear below the roots.
/// Siblings are ordered like the roots. A category reachable twice (a
/// corrupted parent chain) is emitted only once.
pub fn hierarchical_rows(roots: &[Category], all: &[Category], sort: SortDir) -> Vec<CategoryRow> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for root in roots {
        push_with_children(root, all, sort, 0, &mut seen, &mut rows);
    }

    rows
}

fn push_with_children(
    category: &Category,
    all: &[Category],
    sort: SortDir,
    depth: usize,
    seen: &mut HashSet<CategoryId>,
    rows: &mut Vec<CategoryRow>,
) {
    if !seen.insert(category.id) {
        return;
    }

    rows.push(CategoryRow {
        category: category.clone(),
        display_name: format!("{}{}", "--".repeat(depth), category.name),
        depth,
    });

    let mut children: Vec<Category> = all
        .iter()
        .filter(|c| c.parent_id == Some(category.id))
        .cloned()
        .collect();
    sort_categories_by_name(&mut children, sort);

    for child in &children {
        push_with_children(child, all, sort, depth + 1, seen, rows);
    }
}

/// Decides whether a category name and alias are free to use.
///
/// `id` is the category being edited (`None` when creating). `by_name` and
/// `by_alias` are the stored categories carrying the submitted name and
/// alias. A match on the edited category itself is not a conflict.
pub fn check_category_unique(
    id: Option<CategoryId>,
    by_name: Option<&Category>,
    by_alias: Option<&Category>,
) -> Uniqueness {
    let conflicts = |found: Option<&Category>| found.is_some_and(|c| Some(c.id) != id);

    if conflicts(by_name) {
        Uniqueness::DuplicateName
    } else if conflicts(by_alias) {
        Uniqueness::DuplicateAlias
    } else {
        Uniqueness::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewCategory;

    fn category(id: CategoryId, name: &str, parent: Option<CategoryId>) -> Category {
        let mut new = NewCategory::new(name, name.to_lowercase());
        new.parent_id = parent;
        new.into_category(id)
    }

    fn catalog() -> Vec<Category> {
        vec![
            category(1, "Electronics", None),
            category(2, "Computers", None),
            category(3, "Cameras", Some(1)),
            category(4, "Audio", Some(1)),
            category(5, "Headphones", Some(4)),
            category(6, "Laptops", Some(2)),
        ]
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(true), "enabled");
        assert_eq!(status_label(false), "disabled");
    }

    #[test]
    fn test_hierarchical_rows_ascending() {
        let all = catalog();
        let mut roots: Vec<Category> = all.iter().filter(|c| c.is_root()).cloned().collect();
        sort_categories_by_name(&mut roots, SortDir::Asc);

        let names: Vec<String> = hierarchical_rows(&roots, &all, SortDir::Asc)
            .into_iter()
            .map(|row| row.display_name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Computers",
                "--Laptops",
                "Electronics",
                "--Audio",
                "----Headphones",
                "--Cameras",
            ]
        );
    }

    #[test]
    fn test_hierarchical_rows_descending_siblings() {
        let all = catalog();
        let roots = vec![all[0].clone()];

        let rows = hierarchical_rows(&roots, &all, SortDir::Desc);

        let names: Vec<&str> = rows.iter().map(|r| r.category.name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Cameras", "Audio", "Headphones"]);
        assert_eq!(rows[3].depth, 2);
    }

    #[test]
    fn test_hierarchical_rows_tolerates_cycles() {
        let all = vec![category(1, "A", Some(2)), category(2, "B", Some(1))];
        let rows = hierarchical_rows(&all[..1], &all, SortDir::Asc);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_check_unique_new_category() {
        let existing = category(1, "Electronics", None);

        assert_eq!(check_category_unique(None, None, None), Uniqueness::Ok);
        assert_eq!(
            check_category_unique(None, Some(&existing), None),
            Uniqueness::DuplicateName
        );
        assert_eq!(
            check_category_unique(None, None, Some(&existing)),
            Uniqueness::DuplicateAlias
        );
    }

    #[test]
    fn test_check_unique_editing_same_category() {
        let existing = category(1, "Electronics", None);

        assert_eq!(
            check_category_unique(Some(1), Some(&existing), Some(&existing)),
            Uniqueness::Ok
        );
        assert_eq!(
            check_category_unique(Some(2), Some(&existing), None),
            Uniqueness::DuplicateName
        );
    }

    #[test]
    fn test_uniqueness_as_str() {
        assert_eq!(Uniqueness::Ok.as_str(), "OK");
        assert_eq!(Uniqueness::DuplicateName.as_str(), "DuplicateName");
        assert_eq!(Uniqueness::DuplicateAlias.as_str(), "DuplicateAlias");
    }
}
