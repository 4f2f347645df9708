//! Upload collection.
//!
//! Pages through a channel's full upload history and attaches parsed
//! description metadata to every item. The whole history is always
//! traversed before any filtering: page ordering is reverse-chronological
//! by upstream convention only, not contract, so stopping early at the
//! first out-of-window page can drop in-window items.

use crate::api::{ApiError, VideoPlatform};
use crate::extract::{extract_metadata, extract_score};
use crate::models::UploadItem;
use crate::progress::create_spinner;

/// Collect every upload of the channel, in the provider's native order,
/// with `info` and `score` populated.
pub fn collect_all(
    platform: &impl VideoPlatform,
    handle: &str,
) -> Result<Vec<UploadItem>, ApiError> {
    let playlist_id = platform.resolve_uploads_playlist(handle)?;

    let spinner = create_spinner("Phase 1: Collecting uploads");
    let mut items: Vec<UploadItem> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = platform.list_uploads(&playlist_id, page_token.as_deref())?;
        if page.items.is_empty() {
            break;
        }

        for mut item in page.items {
            item.info = extract_metadata(&item.description);
            item.score = extract_score(&item.description);
            items.push(item);
        }
        spinner.set_message(format!("Phase 1: Collecting uploads ({})", items.len()));

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    spinner.finish_with_message(format!("Phase 1: Collected {} uploads", items.len()));
    Ok(items)
}
