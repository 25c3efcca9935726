//! Driver layer for headless browser automation.
//!
//! This crate wraps a Chromium instance driven over the DevTools protocol and
//! exposes the small surface the extraction pipeline needs: navigation with a
//! wait condition and timeout, a bounded selector wait, fixed settle delays,
//! rendered-HTML capture, and JSON response interception.
//!
//! - [`browser::driver::PageliftBrowser`]: Chromium launcher and page factory
//! - [`browser::page::PageliftPage`]: navigation, waits, HTML and response capture
//! - [`browser::stealth`]: anti-automation launch args and JS evasions
//! - [`browser::fingerprint`]: per-session user agent profiles
pub mod browser;
