use crate::attio::{CrmClient, PageSize};
use crate::error::InsightsResult;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Follows the notes cursor until the server reports no further pages.
///
/// Records keep the order the server returned them in. A failed page aborts
/// the whole fetch and whatever was accumulated so far is dropped. A cursor
/// the server already handed out ends the fetch.
pub async fn fetch_all_notes(client: &dyn CrmClient, page_size: PageSize) -> InsightsResult<Vec<Value>> {
    let mut all_notes = Vec::new();
    let mut cursor: Option<String> = None;
    let mut seen_cursors = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = client.list_notes(page_size, cursor.as_deref()).await?;
        pages += 1;
        debug!(page = pages, records = page.data.len(), has_more = page.has_more, "Fetched notes page");

        if page.has_more && page.continuation().is_none() {
            warn!(page = pages, "Server reported more notes without a cursor, stopping");
        }

        let next = page.continuation().map(str::to_string);
        all_notes.extend(page.data);

        match next {
            Some(next) if !seen_cursors.insert(next.clone()) => {
                warn!(page = pages, cursor = %next, "Server repeated a cursor, stopping");
                break;
            }
            Some(next) => cursor = Some(next),
            None => break
        }
    }

    info!(count = all_notes.len(), pages, "Fetched notes from CRM");
    Ok(all_notes)
}
