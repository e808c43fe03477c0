use serde::{Deserialize, Serialize};

/// Sort direction for name-ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Parses `asc`/`desc`, falling back to ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDir::Desc
        } else {
            SortDir::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Page numbers below 1 are clamped to 1, sizes below 1 to 1.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.size)
    }
}

/// One page of results plus the counts the pager needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        Self {
            items,
            request,
            total_items,
        }
    }

    /// Slices an already sorted collection.
    pub fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self::new(items, request, total_items)
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.request.size)
    }

    /// 1-based position of the first item on this page (0 when empty).
    pub fn start_count(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.request.offset() + 1
        }
    }

    /// 1-based position of the last item on this page.
    pub fn end_count(&self) -> usize {
        self.request.offset().saturating_add(self.items.len())
    }
}
