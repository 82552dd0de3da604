//! Client-side fallback: fetch the full list once, filter in memory.

use advocate_core::{filter_advocates, Advocate};
use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::FetchError;
use crate::source::AdvocateSource;

/// Wraps another source, asking it only for the unfiltered set.
///
/// The first successful full fetch is cached; a failed one is not, so the
/// next call (a retry) asks again.
pub struct LocalSearch<S> {
    source: S,
    cache: OnceCell<Vec<Advocate>>,
}

impl<S: AdvocateSource> LocalSearch<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    /// Start from an already fetched full set.
    pub fn preloaded(source: S, advocates: Vec<Advocate>) -> Self {
        Self {
            source,
            cache: OnceCell::new_with(Some(advocates)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// Forget the cached set; the next fetch reloads it.
    pub fn invalidate(&mut self) {
        self.cache.take();
    }
}

#[async_trait]
impl<S: AdvocateSource> AdvocateSource for LocalSearch<S> {
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Advocate>, FetchError> {
        let all = self
            .cache
            .get_or_try_init(|| async {
                tracing::debug!("loading full advocate list for local filtering");
                self.source.fetch(None).await
            })
            .await?;
        Ok(filter_advocates(all, query.unwrap_or_default()))
    }
}
