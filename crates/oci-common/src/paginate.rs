//! Page-following helper for list operations.

use std::future::Future;

use crate::error::Result;
use crate::response::OperationResponse;

/// Fetch every page of a list operation.
///
/// `fetch` receives the page token (`None` for the first page) and returns
/// one page. Pages are requested until `opc-next-page` is absent.
///
/// # Errors
///
/// Returns the first error from `fetch`; items already collected are dropped.
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<OperationResponse<Vec<T>>>>,
{
    let mut items = Vec::new();
    let mut page = None;
    loop {
        let response = fetch(page.take()).await?;
        items.extend(response.data);
        match response.opc_next_page {
            Some(next) => page = Some(next),
            None => return Ok(items),
        }
    }
}
