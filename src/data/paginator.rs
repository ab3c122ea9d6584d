/// Number of pages needed for `len` items; an empty collection has none
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items of a 1-based page: `[(page-1)*size, page*size)`.
///
/// Pages past the end yield an empty slice. Range checks belong to the
/// caller, this only slices.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Whether `page` exists for a collection of `len` items
pub fn is_valid_page(page: usize, len: usize, page_size: usize) -> bool {
    page >= 1 && page <= page_count(len, page_size)
}
