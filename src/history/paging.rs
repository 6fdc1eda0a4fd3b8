/// Rows per history page.
pub const PAGE_SIZE: usize = 5;

/// Number of pages for `count` rows; never less than 1.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Rows shown on 1-based `page`. Pages past the end are empty.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One entry in the pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    Page { number: usize, active: bool },
    Ellipsis,
}

/// Pagination bar for `current` of `total` pages.
///
/// The first page is always listed, the last whenever there is more than one,
/// and up to three pages around `current` in between. Gaps collapse into an
/// ellipsis.
pub fn page_controls(current: usize, total: usize) -> Vec<PageControl> {
    let page = |number| PageControl::Page {
        number,
        active: number == current,
    };
    let mut controls = vec![page(1)];
    if current > 3 {
        controls.push(PageControl::Ellipsis);
    }
    let window_start = current.saturating_sub(1).max(2);
    let window_end = current.saturating_add(1).min(total.saturating_sub(1));
    for number in window_start..=window_end {
        if number <= 1 || number >= total {
            continue;
        }
        controls.push(page(number));
    }
    if current.saturating_add(2) < total && total > 3 {
        controls.push(PageControl::Ellipsis);
    }
    if total > 1 {
        controls.push(page(total));
    }
    controls
}

pub fn can_go_previous(current: usize) -> bool {
    current > 1
}

pub fn can_go_next(current: usize, total: usize) -> bool {
    current < total
}

/// The bar is hidden when everything fits on one page.
pub fn shows_pagination(total: usize) -> bool {
    total > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageControl::Ellipsis;

    fn p(number: usize, active: bool) -> PageControl {
        PageControl::Page { number, active }
    }

    #[test]
    fn total_pages_rounds_up_with_minimum_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(50), 10);
    }

    #[test]
    fn middle_page_has_both_ellipses() {
        assert_eq!(
            page_controls(5, 10),
            vec![p(1, false), Ellipsis, p(4, false), p(5, true), p(6, false), Ellipsis, p(10, false)]
        );
    }

    #[test]
    fn short_bar_has_no_ellipsis() {
        assert_eq!(page_controls(1, 3), vec![p(1, true), p(2, false), p(3, false)]);
        assert_eq!(page_controls(1, 1), vec![p(1, true)]);
        assert_eq!(page_controls(2, 2), vec![p(1, false), p(2, true)]);
    }

    #[test]
    fn edges_of_long_bar() {
        assert_eq!(
            page_controls(1, 10),
            vec![p(1, true), p(2, false), Ellipsis, p(10, false)]
        );
        assert_eq!(
            page_controls(10, 10),
            vec![p(1, false), Ellipsis, p(9, false), p(10, true)]
        );
        assert_eq!(
            page_controls(3, 10),
            vec![p(1, false), p(2, false), p(3, true), p(4, false), Ellipsis, p(10, false)]
        );
        assert_eq!(
            page_controls(8, 10),
            vec![p(1, false), Ellipsis, p(7, false), p(8, true), p(9, false), p(10, false)]
        );
    }

    #[test]
    fn pages_never_exceed_size_and_concatenate_back() {
        let items: Vec<usize> = (0..23).collect();
        let total = total_pages(items.len());
        let mut joined = Vec::new();
        for page in 1..=total {
            let slice = page_slice(&items, page);
            assert!(slice.len() <= PAGE_SIZE);
            joined.extend_from_slice(slice);
        }
        assert_eq!(joined, items);
        assert!(page_slice(&items, total + 1).is_empty());
        assert!(page_slice(&items, 0).len() <= PAGE_SIZE);
    }

    #[test]
    fn navigation_affordances_follow_bounds() {
        assert!(!can_go_previous(1));
        assert!(can_go_previous(2));
        assert!(can_go_next(2, 3));
        assert!(!can_go_next(3, 3));
        assert!(!shows_pagination(1));
        assert!(shows_pagination(2));
    }
}
