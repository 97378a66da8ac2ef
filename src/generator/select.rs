//! Selection applied by pages before rendering

use crate::content::ContentItem;

/// Items with `featured: true`, in their original relative order
pub fn featured_only(items: &[ContentItem]) -> Vec<&ContentItem> {
    items.iter().filter(|item| item.is_featured()).collect()
}

/// The first `n` items, or all of them when there are fewer
pub fn first_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}
