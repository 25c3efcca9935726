use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Snapshot of user agent, viewport, locale, and timezone characteristics.
pub struct UserAgentProfile {
    pub user_agent: String,
    pub viewport: (u32, u32),
    pub languages: Vec<String>,
    pub timezone: String,
}

#[derive(Debug, Clone)]
/// Maintains a small pool of plausible desktop fingerprint profiles. One is
/// chosen per browser session and reused for every page it opens.
pub struct UserAgentManager {
    desktop_profiles: Vec<UserAgentProfile>,
    current_session_profile: Option<UserAgentProfile>,
}

impl UserAgentManager {
    /// Create a new manager with built-in desktop profiles.
    pub fn new() -> Self {
        Self {
            desktop_profiles: vec![
                UserAgentProfile {
                    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
                    viewport: (1920, 1080),
                    languages: vec!["en-US".to_string(), "en".to_string()],
                    timezone: "America/New_York".to_string(),
                },
                UserAgentProfile {
                    user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
                    viewport: (1440, 900),
                    languages: vec!["en-US".to_string(), "en".to_string()],
                    timezone: "America/Los_Angeles".to_string(),
                },
            ],
            current_session_profile: None,
        }
    }

    /// Get (or lazily select) the current session profile.
    pub fn session_profile(&mut self) -> &UserAgentProfile {
        if self.current_session_profile.is_none() {
            let mut rng = rand::thread_rng();
            let p = self
                .desktop_profiles
                .choose(&mut rng)
                .cloned()
                .unwrap_or_else(fallback_profile);
            self.current_session_profile = Some(p);
        }
        self.current_session_profile
            .as_ref()
            .expect("session profile set above")
    }
}

impl Default for UserAgentManager {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_profile() -> UserAgentProfile {
    UserAgentProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
        viewport: (1920, 1080),
        languages: vec!["en-US".to_string(), "en".to_string()],
        timezone: "UTC".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_profile_is_stable_across_calls() {
        let mut manager = UserAgentManager::new();
        let first = manager.session_profile().user_agent.clone();
        let second = manager.session_profile().user_agent.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn profiles_carry_locale_and_timezone() {
        let mut manager = UserAgentManager::new();
        let profile = manager.session_profile();
        assert!(!profile.languages.is_empty());
        assert!(!profile.timezone.is_empty());
    }
}
