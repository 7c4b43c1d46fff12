//! Admin content filter: free-text search plus a category.

use icu::casemap::CaseMapper;

use crate::feed::FeedItem;
use crate::types::{Category, ContentType, LifecycleFlag};

/// ## Summary
/// Narrows the aggregated content list for the admin view.
///
/// An item is kept when it matches the search text and falls in `category`.
/// The search is a case-insensitive substring match over the title, short
/// description and author, compared after Unicode case folding; a blank
/// search matches everything. Input order is preserved.
#[must_use]
pub fn filter_content<'a>(
    items: &'a [FeedItem],
    search: &str,
    category: Category,
) -> Vec<&'a FeedItem> {
    let needle = fold(search.trim());
    items
        .iter()
        .filter(|item| in_category(item, category))
        .filter(|item| needle.is_empty() || matches_search(item, &needle))
        .collect()
}

/// Whether `item` belongs to `category`.
#[must_use]
pub fn in_category(item: &FeedItem, category: Category) -> bool {
    match category {
        Category::All => true,
        Category::News => item.content_type() == ContentType::News,
        Category::Events => item.content_type() == ContentType::Event,
        Category::Upcoming => item.lifecycle() == Some(LifecycleFlag::ComingSoon),
        Category::Past => item.lifecycle() == Some(LifecycleFlag::PastEvent),
    }
}

fn matches_search(item: &FeedItem, needle: &str) -> bool {
    [item.title(), item.short_description(), item.author()]
        .into_iter()
        .any(|field| fold(field).contains(needle))
}

fn fold(text: &str) -> String {
    CaseMapper::new().fold_string(text).into_owned()
}
