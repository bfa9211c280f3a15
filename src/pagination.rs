use serde::Serialize;

/// Returns the number of pages needed to show `total` items `size` at a time.
fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

/// One window of an ordered listing with the metadata the frontend needs to
/// render its pager. Pages are zero-based.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
    pub size: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: usize, number: usize, size: usize) -> Self {
        let total_pages = total_pages(total_elements, size);

        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
        }
    }

    /// Converts the content while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}
