use crate::browser::{
    fingerprint::{UserAgentManager, UserAgentProfile},
    page::PageliftPage,
    stealth::{build_launch_arguments, core_evasions},
};
use anyhow::{anyhow, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    MediaFeature, SetEmulatedMediaParams, SetTimezoneOverrideParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Thin wrapper around a headless Chromium instance driven over the DevTools
/// protocol. One instance serves exactly one invocation; pages opened from it
/// share the session fingerprint.
pub struct PageliftBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile: UserAgentProfile,
}

impl PageliftBrowser {
    /// Launch a headless Chromium with a randomly chosen session fingerprint.
    pub async fn launch() -> Result<Self> {
        let mut manager = UserAgentManager::new();
        let profile = manager.session_profile().clone();

        let config = BrowserConfig::builder()
            .viewport(Some(Viewport {
                width: profile.viewport.0,
                height: profile.viewport.1,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .args(build_launch_arguments(&profile))
            .build()
            .map_err(|e| anyhow!("browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch headless browser")?;

        // The handler drives all CDP traffic; it must be polled for the
        // lifetime of the browser.
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        info!(target: "browser", user_agent = %profile.user_agent, "browser launched");

        Ok(Self {
            browser,
            handler_task,
            profile,
        })
    }

    /// Open a fresh page with the session fingerprint applied. When `stealth`
    /// is set, automation-detection overrides are installed before any page
    /// script executes.
    pub async fn open_page(&self, stealth: bool) -> Result<PageliftPage> {
        let page = self.browser.new_page("about:blank").await?;

        page.execute(SetUserAgentOverrideParams::new(
            self.profile.user_agent.clone(),
        ))
        .await?;
        page.execute(SetTimezoneOverrideParams::new(self.profile.timezone.clone()))
            .await?;
        page.execute(color_scheme_override()).await?;

        if stealth {
            page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
                core_evasions(&self.profile),
            ))
            .await?;
            debug!(target: "browser", "stealth evasions installed");
        }

        Ok(PageliftPage::new(page))
    }

    /// Shut the browser down and stop the event handler task.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// Pin emulated media to a light color scheme so pages render consistently
/// regardless of the host environment's preference.
fn color_scheme_override() -> SetEmulatedMediaParams {
    let mut params = SetEmulatedMediaParams::default();
    params.features = Some(vec![MediaFeature::new("prefers-color-scheme", "light")]);
    params
}
