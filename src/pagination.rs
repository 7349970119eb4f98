// Collects every page of a paginated listing into one ordered list.
//
// The server decides when to stop: pages are requested until one arrives
// with `continues == false`. There is no iteration cap and no
// deduplication; page order is preserved.

use tracing::info;

use crate::error::Result;
use crate::models::Page;

/// Fetch pages with a zero-based cursor until the server reports the last
/// one. `fetch` is called with `0, 1, 2, ...`; endpoints that do not use a
/// cursor (player search) may ignore it.
///
/// `on_page` observes progress and is handed the cursor and the running
/// item count after each page.
pub fn collect_all<P, F, O>(mut fetch: F, mut on_page: O) -> Result<Vec<P::Item>>
where
    P: Page,
    F: FnMut(u32) -> Result<P>,
    O: FnMut(u32, usize),
{
    let mut items = Vec::new();
    let mut cursor = 0u32;
    loop {
        let page = fetch(cursor)?;
        let more = page.continues();
        items.extend(page.into_items());
        info!(page = cursor, total = items.len(), more, "received page");
        on_page(cursor, items.len());
        if !more {
            return Ok(items);
        }
        cursor += 1;
    }
}
