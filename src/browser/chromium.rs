//! Chromium backend speaking the Chrome DevTools Protocol via chromiumoxide.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestServedFromCache,
    EventRequestWillBeSent, RequestId,
};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::collections::HashSet;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use super::engine::{
    BrowserEngine, BrowserHandle, BrowserOptions, NetworkIdlePolicy, PageHandle, PdfPrintOptions,
};
use crate::error::{Result, WebprintError};

/// Engine backed by a locally spawned Chromium process.
pub struct ChromiumEngine;

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn BrowserHandle>> {
        let config = build_browser_config(options)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| WebprintError::Launch(e.to_string()))?;

        // The handler stream must be polled for CDP commands to make progress.
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        Ok(Box::new(ChromiumBrowser {
            browser: Some(browser),
            handler_task: Some(handler_task),
            options: options.clone(),
        }))
    }
}

fn build_browser_config(options: &BrowserOptions) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder();
    if let Some(path) = &options.chrome_executable {
        builder = builder.chrome_executable(path);
    }
    if !options.headless {
        builder = builder.with_head();
    }
    if options.disable_sandbox {
        builder = builder.arg("--no-sandbox");
    }
    builder.build().map_err(WebprintError::Launch)
}

struct ChromiumBrowser {
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
    options: BrowserOptions,
}

#[async_trait]
impl BrowserHandle for ChromiumBrowser {
    async fn new_page(&mut self) -> Result<Box<dyn PageHandle>> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| WebprintError::Launch("Browser already closed".to_string()))?;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| WebprintError::Launch(format!("Failed to open page: {e}")))?;
        Ok(Box::new(ChromiumPage {
            page: Some(page),
            navigation_timeout: self.options.navigation_timeout,
            network_idle: self.options.network_idle,
        }))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut browser) = self.browser.take() {
            let closed = browser.close().await;
            let _ = browser.wait().await;
            if let Some(task) = self.handler_task.take() {
                task.abort();
            }
            closed
                .map_err(|e| WebprintError::Teardown(format!("Failed to close browser: {e}")))?;
        }
        Ok(())
    }
}

struct ChromiumPage {
    page: Option<Page>,
    navigation_timeout: std::time::Duration,
    network_idle: NetworkIdlePolicy,
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| WebprintError::Navigation("Page already closed".to_string()))?;
        match timeout(
            self.navigation_timeout,
            navigate_and_settle(page, url, &self.network_idle),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(WebprintError::Navigation(format!(
                "Timed out after {:?} waiting for {} to reach network idle",
                self.navigation_timeout, url
            ))),
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| WebprintError::Evaluation("Page already closed".to_string()))?;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| WebprintError::Evaluation(e.to_string()))?;
        let value: serde_json::Value = result
            .into_value()
            .map_err(|e| WebprintError::Evaluation(format!("Failed to decode result: {e}")))?;
        Ok(value)
    }

    async fn print_to_pdf(&self, options: &PdfPrintOptions) -> Result<Vec<u8>> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| WebprintError::Export("Page already closed".to_string()))?;
        page.pdf(pdf_params(options))
            .await
            .map_err(|e| WebprintError::Export(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            page.close()
                .await
                .map_err(|e| WebprintError::Teardown(format!("Failed to close page: {e}")))?;
        }
        Ok(())
    }
}

/// Navigates and waits until at most `max_inflight` requests stayed open for
/// one continuous idle window. Event listeners are attached before the
/// navigation starts so early requests are not missed.
async fn navigate_and_settle(page: &Page, url: &str, policy: &NetworkIdlePolicy) -> Result<()> {
    page.execute(EnableParams::default())
        .await
        .map_err(|e| WebprintError::Navigation(format!("Failed to enable network tracking: {e}")))?;

    let mut started = page
        .event_listener::<EventRequestWillBeSent>()
        .await
        .map_err(subscribe_err)?;
    let mut finished = page
        .event_listener::<EventLoadingFinished>()
        .await
        .map_err(subscribe_err)?;
    let mut failed = page
        .event_listener::<EventLoadingFailed>()
        .await
        .map_err(subscribe_err)?;
    let mut cached = page
        .event_listener::<EventRequestServedFromCache>()
        .await
        .map_err(subscribe_err)?;

    page.goto(url)
        .await
        .map_err(|e| WebprintError::Navigation(e.to_string()))?;

    let mut in_flight: HashSet<RequestId> = HashSet::new();
    let mut idle_since = Some(Instant::now());

    loop {
        let wait = match idle_since {
            Some(since) => {
                let elapsed = since.elapsed();
                if elapsed >= policy.idle_window {
                    return Ok(());
                }
                policy.idle_window - elapsed
            }
            None => policy.idle_window,
        };

        tokio::select! {
            event = started.next() => match event {
                Some(event) => {
                    in_flight.insert(event.request_id.clone());
                }
                None => return Err(stream_ended()),
            },
            event = finished.next() => match event {
                Some(event) => {
                    in_flight.remove(&event.request_id);
                }
                None => return Err(stream_ended()),
            },
            event = failed.next() => match event {
                Some(event) => {
                    in_flight.remove(&event.request_id);
                }
                None => return Err(stream_ended()),
            },
            event = cached.next() => match event {
                Some(event) => {
                    in_flight.remove(&event.request_id);
                }
                None => return Err(stream_ended()),
            },
            _ = sleep(wait) => {}
        }

        idle_since = match (in_flight.len() <= policy.max_inflight, idle_since) {
            (true, Some(since)) => Some(since),
            (true, None) => Some(Instant::now()),
            (false, _) => None,
        };
    }
}

fn subscribe_err(e: chromiumoxide::error::CdpError) -> WebprintError {
    WebprintError::Navigation(format!("Failed to subscribe to network events: {e}"))
}

fn stream_ended() -> WebprintError {
    WebprintError::Navigation("Browser event stream ended before network idle".to_string())
}

fn pdf_params(options: &PdfPrintOptions) -> PrintToPdfParams {
    let (width, height) = options.format.paper_size();
    PrintToPdfParams::builder()
        .print_background(options.print_background)
        .paper_width(width)
        .paper_height(height)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PageFormat;

    #[test]
    fn pdf_params_carry_a4_dimensions() {
        let params = pdf_params(&PdfPrintOptions {
            format: PageFormat::A4,
            print_background: true,
        });
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.paper_width, Some(8.27));
        assert_eq!(params.paper_height, Some(11.7));
    }

    #[test]
    fn pdf_params_respect_background_toggle() {
        let params = pdf_params(&PdfPrintOptions {
            format: PageFormat::A4,
            print_background: false,
        });
        assert_eq!(params.print_background, Some(false));
    }

    #[test]
    fn config_builds_with_explicit_executable() {
        let options = BrowserOptions {
            chrome_executable: Some(std::path::PathBuf::from("/usr/bin/true")),
            ..BrowserOptions::default()
        };
        assert!(build_browser_config(&options).is_ok());
    }
}
