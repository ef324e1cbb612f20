#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// One-based.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into one-based pages. A page size of zero is treated as one;
/// a page number outside the range yields an empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let page_items = if page == 0 {
        Vec::new()
    } else {
        items.iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect()
    };

    Page {
        items: page_items,
        number: page,
        total_pages,
        total_items,
    }
}
