//! Concurrent retrieval of paginated collections.
//!
//! The first page is fetched on its own to learn `total_pages`. Every
//! remaining page then gets its own task; tasks report through one channel
//! and the collector returns as soon as any page fails.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;

use crate::error::BudaError;
use crate::rest::client::{RestClient, with_query};
use crate::types::{Envelope, PageMeta};

/// Query parameters of one page request.
#[derive(Debug, Clone, Serialize)]
pub struct PageQuery<'a> {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per: u32,
    /// Optional state filter (orders, deposits, withdrawals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a str>,
}

/// One fetched page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based page number.
    pub ordinal: u32,
    /// Items in the order the server returned them.
    pub items: Vec<T>,
}

/// Aborts still-running page tasks when the collector stops listening.
struct AbortOnDrop(Vec<JoinHandle<()>>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

impl RestClient {
    /// Fetch one page of a private collection.
    ///
    /// Returns the page together with the metadata the server sent, if any.
    pub async fn fetch_page<T>(
        &self,
        endpoint: &str,
        key: &str,
        page: u32,
        state: Option<&str>,
    ) -> Result<(Page<T>, Option<PageMeta>), BudaError>
    where
        T: DeserializeOwned,
    {
        let query = PageQuery {
            page,
            per: self.config().page_size,
            state,
        };
        let path = with_query(endpoint, &query)?;
        let body = self.fetch_raw(&path, true).await?;
        let envelope = Envelope::<Vec<T>>::from_slice(&body, key)?;

        Ok((
            Page {
                ordinal: page,
                items: envelope.data,
            },
            envelope.meta,
        ))
    }

    /// Fetch every page of a private collection and return all items.
    ///
    /// Items within a page keep the server's order; pages are appended in
    /// the order they complete. Any failing page fails the whole call with
    /// [`BudaError::Page`] and no items are returned.
    pub async fn fetch_all_pages<T>(
        &self,
        endpoint: &str,
        key: &str,
        state: Option<&str>,
    ) -> Result<Vec<T>, BudaError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (first, meta) = self.fetch_page::<T>(endpoint, key, 1, state).await?;

        let total_pages = match meta {
            Some(meta) if meta.has_more_pages() => meta.total_pages,
            _ => return Ok(first.items),
        };

        let remaining = (total_pages - 1) as usize;
        tracing::debug!(endpoint, total_pages, "fetching remaining pages concurrently");

        // One slot per task: a task never waits on a collector that has stopped reading.
        let (tx, mut rx) = mpsc::channel::<Result<Page<T>, BudaError>>(remaining);
        let limiter = self
            .config()
            .max_concurrent_pages
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        let mut tasks = AbortOnDrop(Vec::with_capacity(remaining));
        for page in 2..=total_pages {
            let client = self.clone();
            let tx = tx.clone();
            let limiter = limiter.clone();
            let endpoint = endpoint.to_string();
            let key = key.to_string();
            let state = state.map(str::to_string);

            tasks.0.push(tokio::spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => match limiter.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            let _ = tx.send(Err(BudaError::TaskFailed(e.to_string()))).await;
                            return;
                        }
                    },
                    None => None,
                };

                let result = client
                    .fetch_page::<T>(&endpoint, &key, page, state.as_deref())
                    .await
                    .map(|(fetched, _)| fetched)
                    .map_err(|e| BudaError::for_page(page, e));
                let _ = tx.send(result).await;
            }));
        }
        drop(tx);

        let mut items = first.items;
        for _ in 0..remaining {
            match rx.recv().await {
                Some(Ok(page)) => items.extend(page.items),
                Some(Err(e)) => {
                    tracing::warn!(endpoint, error = %e, "paginated fetch failed");
                    return Err(e);
                }
                None => {
                    return Err(BudaError::TaskFailed(
                        "page task ended without reporting a result".to_string(),
                    ));
                }
            }
        }
        drop(tasks);

        if let Some(meta) = meta {
            if items.len() as u64 != meta.total_count {
                tracing::debug!(
                    endpoint,
                    expected = meta.total_count,
                    received = items.len(),
                    "collection changed while it was being paginated"
                );
            }
        }

        Ok(items)
    }
}
