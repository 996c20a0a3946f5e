use chrono::{DateTime, Utc};
use pagecraft_page::Page;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Read access to the persisted page resource. The sync client is a
/// read-only observer: this is the only interface it touches.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch_page_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Page, FetchError>> + Send;
}

/// Polling sync manager. One background task per page key; starting a
/// key that is already active replaces its task, so there is never more
/// than one timer per key.
///
/// Each tick fetches the page and compares `updated_at` against the
/// last-observed marker (initialized from the first successful fetch,
/// without firing). A strictly newer marker delivers the full page to
/// `on_change`; a failed fetch reports to `on_error` and polling
/// continues — transient failures must not kill the loop.
///
/// Stopping a key aborts its task at the next await point; callbacks
/// run inside the task, so none are invoked after cancellation.
pub struct AutoSync<F> {
    fetcher: Arc<F>,
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl<F: PageFetcher> AutoSync<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn start(
        &self,
        page_key: impl Into<String>,
        interval: Duration,
        mut on_change: impl FnMut(Page) + Send + 'static,
        mut on_error: impl FnMut(FetchError) + Send + 'static,
    ) {
        let page_key = page_key.into();
        let fetcher = Arc::clone(&self.fetcher);
        let slug = page_key.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_seen: Option<DateTime<Utc>> = None;

            loop {
                ticker.tick().await;

                match fetcher.fetch_page_by_slug(&slug).await {
                    Ok(page) => match last_seen {
                        None => {
                            debug!(slug = %slug, marker = %page.updated_at, "sync baseline established");
                            last_seen = Some(page.updated_at);
                        }
                        Some(seen) if page.updated_at > seen => {
                            debug!(slug = %slug, marker = %page.updated_at, "page changed, delivering");
                            last_seen = Some(page.updated_at);
                            on_change(page);
                        }
                        Some(_) => {}
                    },
                    Err(err) => {
                        warn!(slug = %slug, error = %err, "sync tick failed, will retry");
                        on_error(err);
                    }
                }
            }
        });

        let mut tasks = self.tasks.lock().unwrap();
        if let Some(previous) = tasks.insert(page_key, handle) {
            previous.abort();
        }
    }

    /// Cancel the task for `page_key`. Returns whether one was active.
    pub fn stop(&self, page_key: &str) -> bool {
        match self.tasks.lock().unwrap().remove(page_key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn stop_all(&self) {
        let mut tasks = self.tasks.lock().unwrap();
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_active(&self, page_key: &str) -> bool {
        self.tasks.lock().unwrap().contains_key(page_key)
    }
}

impl<F> Drop for AutoSync<F> {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for (_, handle) in tasks.drain() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::mpsc;

    struct MockFetcher {
        page: Mutex<Page>,
        failing: AtomicBool,
    }

    impl MockFetcher {
        fn new(page: Page) -> Self {
            Self {
                page: Mutex::new(page),
                failing: AtomicBool::new(false),
            }
        }

        fn set_title(&self, title: &str) {
            let mut page = self.page.lock().unwrap();
            page.title = title.to_string();
            page.touch(Utc::now());
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl PageFetcher for MockFetcher {
        async fn fetch_page_by_slug(&self, slug: &str) -> Result<Page, FetchError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(FetchError::Transport("connection refused".to_string()));
            }
            let page = self.page.lock().unwrap();
            if page.slug == slug {
                Ok(page.clone())
            } else {
                Err(FetchError::NotFound(slug.to_string()))
            }
        }
    }

    fn test_page() -> Page {
        Page::new("p1", "promo", "Promo", Utc::now())
    }

    const INTERVAL: Duration = Duration::from_millis(2000);

    #[tokio::test(start_paused = true)]
    async fn test_change_observed_within_one_interval() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (tx, mut rx) = mpsc::unbounded_channel();

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = tx.send(page);
            },
            |_| {},
        );

        // First tick establishes the baseline without firing
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(rx.try_recv().is_err());

        // A full quiet interval: still nothing
        tokio::time::sleep(INTERVAL).await;
        assert!(rx.try_recv().is_err());

        // Edit lands; the next tick must deliver the full page
        fetcher.set_title("Updated Title");
        tokio::time::sleep(INTERVAL + Duration::from_millis(100)).await;
        let observed = rx.try_recv().expect("change not observed within one interval");
        assert_eq!(observed.title, "Updated Title");

        // And only once per marker bump
        tokio::time::sleep(INTERVAL).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_marker_does_not_fire() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (tx, mut rx) = mpsc::unbounded_channel();

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = tx.send(page);
            },
            |_| {},
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Marker moves backwards (e.g. a restored backup): not "newer"
        {
            let mut page = fetcher.page.lock().unwrap();
            page.updated_at = page.updated_at - chrono::Duration::seconds(60);
        }
        tokio::time::sleep(INTERVAL * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_reported_and_polling_continues() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (change_tx, mut change_rx) = mpsc::unbounded_channel();
        let (error_tx, mut error_rx) = mpsc::unbounded_channel();

        fetcher.set_failing(true);
        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = change_tx.send(page);
            },
            move |err| {
                let _ = error_tx.send(err);
            },
        );

        tokio::time::sleep(INTERVAL * 2).await;
        assert!(error_rx.try_recv().is_ok(), "fetch failures must surface");

        // Transport recovers; the first success is the baseline, the
        // edit after it is delivered
        fetcher.set_failing(false);
        tokio::time::sleep(INTERVAL).await;
        fetcher.set_title("Back Online");
        tokio::time::sleep(INTERVAL + Duration::from_millis(100)).await;

        let observed = change_rx.try_recv().expect("polling stopped after errors");
        assert_eq!(observed.title, "Back Online");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_the_timer() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = old_tx.send(page);
            },
            |_| {},
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = new_tx.send(page);
            },
            |_| {},
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        fetcher.set_title("After Restart");
        tokio::time::sleep(INTERVAL * 2).await;

        assert!(new_rx.try_recv().is_ok(), "replacement subscriber must observe");
        assert!(old_rx.try_recv().is_err(), "replaced timer must be dead");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_and_silences_callbacks() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (tx, mut rx) = mpsc::unbounded_channel();

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = tx.send(page);
            },
            |_| {},
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(sync.stop("promo"));
        assert!(!sync.is_active("promo"));
        assert!(!sync.stop("promo"), "second stop has nothing to cancel");

        fetcher.set_title("After Stop");
        tokio::time::sleep(INTERVAL * 3).await;
        assert!(rx.try_recv().is_err(), "callback ran after cancellation");
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_keys_poll_independently() {
        let fetcher = Arc::new(MockFetcher::new(test_page()));
        let sync = AutoSync::new(Arc::clone(&fetcher));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (missing_tx, mut missing_rx) = mpsc::unbounded_channel();

        sync.start(
            "promo",
            INTERVAL,
            move |page| {
                let _ = tx.send(page);
            },
            |_| {},
        );
        sync.start(
            "other-page",
            INTERVAL,
            |_| {},
            move |err| {
                let _ = missing_tx.send(err);
            },
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        fetcher.set_title("Changed");
        tokio::time::sleep(INTERVAL * 2).await;

        assert!(rx.try_recv().is_ok());
        assert!(matches!(missing_rx.try_recv(), Ok(FetchError::NotFound(_))));
        assert!(sync.is_active("promo") && sync.is_active("other-page"));
    }
}
