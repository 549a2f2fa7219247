//! Browser-driven page fetching.
//!
//! One fetch is synchronous and blocking end-to-end: launch, navigate,
//! settle, bounded marker waits, capture, close. Each call owns its
//! browser session exclusively and the session is dropped on every
//! exit path, success or failure. Nothing is pooled or shared across
//! fetches; the render timing of the target site dominates latency, so
//! session startup cost is an accepted trade for isolation.

use std::ffi::OsStr;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, warn};

use crate::config::ScrapeConfig;
use crate::error::FetchError;

/// Which page layout is being fetched. Detail pages render their trade
/// table asynchronously after the heading, so they get an extra
/// bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Portfolio,
    StockDetail,
}

/// The realized document after JavaScript execution, copied out of the
/// browser before the session is released.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL the browser actually ended up on.
    pub url: String,
    pub html: String,
}

/// Source of rendered documents. The production implementation drives
/// a headless browser; tests substitute static documents or failures.
pub trait PageSource {
    fn fetch(&self, url: &str, kind: PageKind) -> Result<RenderedPage, FetchError>;
}

/// Scopes one live session to one fetch. Dropping the guard releases
/// the underlying resource; the optional flag records the release so
/// tests can observe it.
struct SessionGuard<T> {
    resource: T,
    released: Option<Arc<AtomicBool>>,
}

impl<T> SessionGuard<T> {
    fn new(resource: T) -> Self {
        Self {
            resource,
            released: None,
        }
    }

    #[cfg(test)]
    fn tracked(resource: T, released: Arc<AtomicBool>) -> Self {
        Self {
            resource,
            released: Some(released),
        }
    }
}

impl<T> Deref for SessionGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T> Drop for SessionGuard<T> {
    fn drop(&mut self) {
        if let Some(flag) = &self.released {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

/// Runs the navigation script against a guarded session. The guard is
/// consumed here, so the session is gone by the time the result leaves
/// this function, on the error path included.
fn drive_session<T>(
    session: SessionGuard<T>,
    run: impl FnOnce(&T) -> Result<RenderedPage, FetchError>,
) -> Result<RenderedPage, FetchError> {
    let page = run(&session)?;
    drop(session);
    Ok(page)
}

/// `PageSource` backed by a headless Chrome session per fetch.
#[derive(Debug, Clone, Default)]
pub struct ChromeFetcher {
    config: ScrapeConfig,
}

impl ChromeFetcher {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    fn launch(&self) -> Result<Browser, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(self.config.headless)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
            ])
            .build()
            .map_err(|e| FetchError::Launch(e.to_string()))?;
        Browser::new(options).map_err(|e| FetchError::Launch(e.to_string()))
    }

    fn drive(&self, browser: &Browser, url: &str, kind: PageKind) -> Result<RenderedPage, FetchError> {
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        if let Err(e) = tab.set_user_agent(&self.config.user_agent, None, None) {
            warn!("failed to set user agent: {e}");
        }

        debug!("navigating to {url}");
        tab.navigate_to(url).map_err(|e| FetchError::Navigate {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        tab.wait_until_navigated().map_err(|e| FetchError::Navigate {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Fixed settle: the site has no reliable render-complete signal.
        let settle = match kind {
            PageKind::Portfolio => self.config.settle,
            PageKind::StockDetail => self.config.detail_settle,
        };
        thread::sleep(settle);

        // Explicit marker waits are best-effort: a timeout here means we
        // proceed with whatever rendered, not that the fetch failed.
        if let Err(e) = tab.wait_for_element_with_custom_timeout("h1", self.config.marker_timeout) {
            warn!("no heading appeared within marker timeout: {e}");
        }
        if kind == PageKind::StockDetail {
            if let Err(e) =
                tab.wait_for_element_with_custom_timeout("table", self.config.table_timeout)
            {
                warn!("no table appeared within table timeout: {e}");
            }
        }

        let html = tab
            .get_content()
            .map_err(|e| FetchError::Capture(e.to_string()))?;
        let realized_url = tab.get_url();
        debug!(
            "captured {} characters of rendered HTML from {realized_url}",
            html.len()
        );

        Ok(RenderedPage {
            url: realized_url,
            html,
        })
    }
}

impl PageSource for ChromeFetcher {
    fn fetch(&self, url: &str, kind: PageKind) -> Result<RenderedPage, FetchError> {
        // The Browser handle owns the child process; releasing the
        // guard terminates the session.
        let session = SessionGuard::new(self.launch()?);
        drive_session(session, |browser| self.drive(browser, url, kind))
    }
}
