use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventResponseReceived, GetResponseBodyParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use pagelift_common::PageliftError;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, trace, warn};

/// Readiness condition a navigation waits for before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Return as soon as the initial document is parsed. Used for pages with
    /// continuous background polling that never go quiet.
    DomContentLoaded,
    /// Wait for the page's load lifecycle to finish.
    NetworkIdle,
}

/// High-level page wrapper exposing the waits and captures the extraction
/// pipeline needs.
pub struct PageliftPage {
    page: Page,
}

/// Owned buffer filled by the response listener task. Read it back once the
/// page has settled; taking the payload also stops the listener.
pub struct ResponseCapture {
    slot: Arc<Mutex<Option<Value>>>,
    task: JoinHandle<()>,
}

impl ResponseCapture {
    /// Stop listening and hand over whatever was captured last.
    pub async fn take(self) -> Option<Value> {
        self.task.abort();
        self.slot.lock().await.take()
    }
}

impl PageliftPage {
    pub(crate) fn new(page: Page) -> Self {
        Self { page }
    }

    /// Navigate to `url`, bounded by `nav_timeout`. Exceeding the bound maps
    /// to [`PageliftError::Timeout`].
    pub async fn goto(&self, url: &str, wait: WaitUntil, nav_timeout: Duration) -> Result<()> {
        let nav = async {
            self.page.goto(url).await?;
            if wait == WaitUntil::NetworkIdle {
                self.page.wait_for_navigation().await?;
            }
            Ok::<_, anyhow::Error>(())
        };
        match timeout(nav_timeout, nav).await {
            Ok(res) => res,
            Err(_) => {
                warn!(target: "browser.nav", %url, "navigation timed out");
                Err(PageliftError::Timeout.into())
            }
        }
    }

    /// Poll for `selector` until it appears or `wait` elapses. Non-fatal:
    /// returns whether the element showed up in time.
    pub async fn wait_for_selector(&self, selector: &str, wait: Duration) -> bool {
        let deadline = Instant::now() + wait;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }
            if Instant::now() >= deadline {
                trace!(target: "browser.nav", selector, "selector never appeared");
                return false;
            }
            sleep(Duration::from_millis(250)).await;
        }
    }

    /// Fixed settle delay to let client-side rendering finish.
    pub async fn settle(&self, ms: u64) {
        sleep(Duration::from_millis(ms)).await;
    }

    /// Return the fully rendered HTML.
    pub async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// Start capturing network responses whose URL contains any of
    /// `fragments`, keeping the most recent body that parses as JSON.
    pub async fn capture_json_responses(&self, fragments: &[&str]) -> Result<ResponseCapture> {
        self.page.execute(EnableParams::default()).await?;
        let mut events = self
            .page
            .event_listener::<EventResponseReceived>()
            .await?;

        let fragments: Vec<String> = fragments.iter().map(|f| f.to_string()).collect();
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        let page = self.page.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let url = event.response.url.clone();
                if !fragments.iter().any(|f| url.contains(f.as_str())) {
                    continue;
                }
                debug!(target: "browser.capture", %url, "matched internal endpoint");
                // The body is not always available the instant headers arrive.
                sleep(Duration::from_millis(200)).await;
                let params = GetResponseBodyParams::new(event.request_id.clone());
                let body = match page.execute(params).await {
                    Ok(body) => body,
                    Err(_) => continue,
                };
                if body.result.base64_encoded {
                    continue;
                }
                if let Ok(value) = serde_json::from_str::<Value>(&body.result.body) {
                    *sink.lock().await = Some(value);
                }
            }
        });

        Ok(ResponseCapture { slot, task })
    }

    /// Close the underlying page. Failure to close is logged, not surfaced.
    pub async fn close(self) {
        if let Err(err) = self.page.close().await {
            warn!(target: "browser", %err, "failed to close page");
        }
    }
}
