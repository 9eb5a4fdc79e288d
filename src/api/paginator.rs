// src/api/paginator.rs
//! Resilient parallel pagination.
//!
//! Pages are fetched in rounds of `workers` concurrent requests at
//! consecutive offsets. Every fetched item is tagged with its global
//! collection index (page offset + position within the page) so the
//! final result is in collection order no matter which page completed
//! first. A failed page is isolated: it is recorded, never aborts the
//! run, and never signals end-of-collection — only a successful short
//! page does.

use crate::constants::MAX_PAGE_WORKERS;
use crate::error::Result;
use futures::future::join_all;
use std::future::Future;
use std::time::{Duration, Instant};

/// Tuning knobs for [`fetch_all`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Items requested per page.
    pub chunk_size: u32,
    /// Pages fetched concurrently per round.
    pub workers: usize,
    /// Wall-clock budget for the whole run, checked between rounds.
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chunk_size: crate::constants::DEFAULT_CHUNK_SIZE,
            workers: crate::constants::DEFAULT_PAGE_WORKERS,
            timeout: None,
        }
    }
}

/// One page that could not be fetched during a [`fetch_all`] run.
#[derive(Debug)]
pub struct PageFailure {
    /// Offset of the failed page.
    pub offset: u32,
    pub error: crate::error::TidalError,
}

/// Outcome of a [`fetch_all`] run.
///
/// `items` is everything that was fetched, in collection order.
/// `reached_end` distinguishes "the collection is exhausted" from "we
/// stopped because pages kept failing or the time budget ran out";
/// callers that need completeness must check it together with
/// `failed_pages`.
#[derive(Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub failed_pages: Vec<PageFailure>,
    /// True only when a successful page came back short.
    pub reached_end: bool,
}

impl<T> Paginated<T> {
    /// Whether every page was fetched and the collection end was seen.
    pub fn is_complete(&self) -> bool {
        self.reached_end && self.failed_pages.is_empty()
    }
}

/// Fetches an entire paginated collection.
///
/// `page_fn(limit, offset)` fetches one page; `parse` maps each raw item
/// to the output type after reassembly. Each round dispatches `workers`
/// pages concurrently; the run ends when a successful page is shorter
/// than `chunk_size`, when an entire round fails (the collection length
/// is unknowable past that point), or when the time budget is exhausted.
pub async fn fetch_all<I, T, F, Fut, P>(
    page_fn: F,
    parse: P,
    options: FetchOptions,
) -> Result<Paginated<T>>
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<I>>>,
    P: Fn(I) -> Result<T>,
{
    let chunk_size = options.chunk_size.max(1);
    let workers = options.workers.clamp(1, MAX_PAGE_WORKERS);
    let deadline = options.timeout.map(|t| Instant::now() + t);

    // Raw items tagged with their global collection index.
    let mut tagged: Vec<(u64, I)> = Vec::new();
    let mut failed_pages: Vec<PageFailure> = Vec::new();
    let mut reached_end = false;
    let mut next_offset: u32 = 0;
    let page_fn = &page_fn;

    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                log::warn!(
                    "Pagination timed out at offset {} with {} items fetched",
                    next_offset,
                    tagged.len()
                );
                break;
            }
        }

        let offsets: Vec<u32> = (0..workers as u32)
            .map(|k| next_offset + k * chunk_size)
            .collect();
        log::debug!("Fetching pages at offsets {:?}", offsets);

        let pages = join_all(
            offsets
                .iter()
                .map(|&offset| async move { (offset, page_fn(chunk_size, offset).await) }),
        )
        .await;

        let mut round_succeeded = false;
        for (offset, outcome) in pages {
            match outcome {
                Ok(items) => {
                    round_succeeded = true;
                    if (items.len() as u32) < chunk_size {
                        reached_end = true;
                    }
                    tagged.extend(
                        items
                            .into_iter()
                            .enumerate()
                            .map(|(pos, item)| (offset as u64 + pos as u64, item)),
                    );
                }
                Err(error) => {
                    log::warn!("Page at offset {} failed: {}", offset, error);
                    failed_pages.push(PageFailure { offset, error });
                }
            }
        }

        if reached_end {
            break;
        }
        if !round_succeeded {
            log::warn!(
                "Every page in the round at offset {} failed; stopping",
                next_offset
            );
            break;
        }
        next_offset += chunk_size * workers as u32;
    }

    tagged.sort_by_key(|(index, _)| *index);
    failed_pages.sort_by_key(|failure| failure.offset);

    let items = tagged
        .into_iter()
        .map(|(_, item)| parse(item))
        .collect::<Result<Vec<T>>>()?;

    Ok(Paginated {
        items,
        failed_pages,
        reached_end,
    })
}
