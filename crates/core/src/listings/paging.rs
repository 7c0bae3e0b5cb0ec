//! One-based pagination.

use localstore_domain::constants::JOBS_PER_PAGE;

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested page, 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.page <= self.total_pages + 1
    }
}

/// Slice `items` into page `page` of `per_page` items.
///
/// Page 0 and pages past the end yield no items. A zero page size falls back
/// to the default of 20.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 { JOBS_PER_PAGE } else { per_page };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let slice = match page.checked_sub(1).and_then(|p| p.checked_mul(per_page)) {
        Some(start) if start < total_items => {
            let end = (start + per_page).min(total_items);
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Page { items: slice, page, total_pages, total_items }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_pages_of_twenty() {
        let items: Vec<u32> = (1..=45).collect();

        let first = paginate(&items, 1, JOBS_PER_PAGE);
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.items[0], 1);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 3, JOBS_PER_PAGE);
        assert_eq!(last.items, (41..=45).collect::<Vec<_>>());
        assert!(!last.has_next());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items = vec!['a', 'b'];
        assert!(paginate(&items, 0, 20).items.is_empty());
        assert!(paginate(&items, 2, 20).items.is_empty());
        assert_eq!(paginate(&items, 2, 20).total_pages, 1);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page = paginate::<u8>(&[], 1, 20);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn zero_page_size_uses_default() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 0).items.len(), 20);
    }
}
