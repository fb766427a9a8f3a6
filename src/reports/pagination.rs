use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slices out page `requested`, clamped to the available range.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], requested: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let number = requested.clamp(1, total_pages.max(1));

    let start = (number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let items_on_page = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items: items_on_page,
        number,
        total_pages,
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_indexed_and_clamped() {
        let items: Vec<u32> = (1..=32).collect();

        let first = paginate(&items, 1, 15);
        assert_eq!(first.items.len(), 15);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 99, 15);
        assert_eq!(last.number, 3);
        assert_eq!(last.items, vec![31, 32]);

        assert_eq!(paginate(&items, 0, 15).number, 1);
    }

    #[test]
    fn empty_input_gives_single_empty_page() {
        let page = paginate::<u32>(&[], 4, 15);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
