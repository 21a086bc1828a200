//! Page slicing and the pagination control model

/// Number of pages needed for `total` items; never less than one
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total, page_size))
}

/// Index range of the items shown on `page` (1-based)
pub fn page_range(page: usize, total: usize, page_size: usize) -> std::ops::Range<usize> {
    let page_size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// One control in the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Prev { target: usize, disabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { target: usize, disabled: bool },
}

/// Pagination state for one filtered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(current: usize, total_items: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current: clamp_page(current, total_items, page_size),
            total_pages: total_pages(total_items, page_size),
            total_items,
            page_size,
        }
    }

    /// Controls to display: prev, first, the window around the current page,
    /// last, next. Each hidden run of pages collapses into one ellipsis.
    pub fn window(&self) -> Vec<PageItem> {
        let mut items = vec![PageItem::Prev {
            target: self.current.saturating_sub(1).max(1),
            disabled: self.current <= 1,
        }];

        let mut gap = false;
        for number in 1..=self.total_pages {
            let shown = number == 1
                || number == self.total_pages
                || number.abs_diff(self.current) <= 1;
            if shown {
                items.push(PageItem::Page {
                    number,
                    current: number == self.current,
                });
                gap = false;
            } else if !gap {
                items.push(PageItem::Ellipsis);
                gap = true;
            }
        }

        items.push(PageItem::Next {
            target: (self.current + 1).min(self.total_pages),
            disabled: self.current >= self.total_pages,
        });
        items
    }

    /// 1-based (first, last) item positions on the current page
    pub fn item_span(&self) -> (usize, usize) {
        let range = page_range(self.current, self.total_items, self.page_size);
        if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<String> {
        items
            .iter()
            .filter_map(|i| match i {
                PageItem::Page { number, .. } => Some(number.to_string()),
                PageItem::Ellipsis => Some("...".to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn test_clamp_and_range() {
        assert_eq!(clamp_page(0, 12, 5), 1);
        assert_eq!(clamp_page(10, 12, 5), 3);
        assert_eq!(page_range(3, 12, 5), 10..12);
        assert_eq!(page_range(1, 0, 5), 0..0);
    }

    #[test]
    fn test_window_always_has_first_and_last() {
        for current in 1..=10 {
            let items = Pagination::new(current, 50, 5).window();
            let nums = numbers(&items);
            assert_eq!(nums.first().map(String::as_str), Some("1"));
            assert_eq!(nums.last().map(String::as_str), Some("10"));
        }
    }

    #[test]
    fn test_window_collapses_gaps() {
        let items = Pagination::new(5, 50, 5).window();
        assert_eq!(numbers(&items), vec!["1", "...", "4", "5", "6", "...", "10"]);

        let items = Pagination::new(1, 50, 5).window();
        assert_eq!(numbers(&items), vec!["1", "2", "...", "10"]);

        let items = Pagination::new(3, 15, 5).window();
        assert_eq!(numbers(&items), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_prev_next_disabled_at_boundaries() {
        let items = Pagination::new(1, 12, 5).window();
        assert_eq!(items[0], PageItem::Prev { target: 1, disabled: true });
        assert_eq!(
            items[items.len() - 1],
            PageItem::Next { target: 2, disabled: false }
        );

        let items = Pagination::new(3, 12, 5).window();
        assert_eq!(items[0], PageItem::Prev { target: 2, disabled: false });
        assert_eq!(
            items[items.len() - 1],
            PageItem::Next { target: 3, disabled: true }
        );
    }

    #[test]
    fn test_single_page() {
        let items = Pagination::new(1, 3, 5).window();
        assert_eq!(numbers(&items), vec!["1"]);
        assert!(matches!(items[0], PageItem::Prev { disabled: true, .. }));
        assert!(matches!(items[2], PageItem::Next { disabled: true, .. }));
    }

    #[test]
    fn test_item_span() {
        assert_eq!(Pagination::new(3, 12, 5).item_span(), (11, 12));
        assert_eq!(Pagination::new(1, 0, 5).item_span(), (0, 0));
    }
}
