//! Page-by-page list fetching.
//!
//! List endpoints return at most `per_page` rows. The helper keeps asking for
//! the next page until one comes back short, so a total that is an exact
//! multiple of the page size costs one trailing empty request.

use std::future::Future;

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Fetch every page from `fetch_page` and concatenate the rows in order.
///
/// `fetch_page(page, per_page)` is called with `page` starting at 1. Pages are
/// requested strictly one at a time. The first error aborts the whole fetch
/// and the rows gathered so far are dropped.
pub async fn fetch_all_pages<T, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut all_rows = Vec::new();
    let mut page = 1u32;

    loop {
        let rows = fetch_page(page, PAGE_SIZE).await?;

        let count = rows.len();
        all_rows.extend(rows);
        tracing::debug!(page, count, total = all_rows.len(), "Fetched page");

        // If we got fewer than PAGE_SIZE, we've reached the end
        if count < PAGE_SIZE as usize {
            break;
        }

        page += 1;
    }

    Ok(all_rows)
}
