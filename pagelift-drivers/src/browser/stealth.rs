//! Anti-automation launch arguments and JS evasions.
//!
//! This is evasion scaffolding, not a correctness guarantee: a defended site
//! may still serve an empty shell to an automated session.

use crate::browser::fingerprint::UserAgentProfile;

/// Chrome command-line arguments for a fingerprinted headless session.
pub fn build_launch_arguments(profile: &UserAgentProfile) -> Vec<String> {
    vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        "--disable-plugins-discovery".to_string(),
        "--disable-gpu".to_string(),
        format!("--user-agent={}", profile.user_agent),
        format!(
            "--window-size={},{}",
            profile.viewport.0, profile.viewport.1
        ),
        format!("--lang={}", profile.languages.join(",")),
    ]
}

/// JavaScript installed before any page script runs. Hides the usual
/// automation signals: the webdriver flag, an empty plugin list, and the
/// missing `window.chrome` runtime object.
pub fn core_evasions(profile: &UserAgentProfile) -> String {
    let languages = profile
        .languages
        .iter()
        .map(|l| format!("'{l}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"
        Object.defineProperty(navigator, 'webdriver', {{ get: () => undefined }});
        Object.defineProperty(navigator, 'plugins', {{ get: () => [1, 2, 3, 4, 5] }});
        Object.defineProperty(navigator, 'languages', {{ get: () => [{languages}] }});
        if (!window.chrome) window.chrome = {{ runtime: {{}} }};
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fingerprint::UserAgentManager;

    #[test]
    fn launch_arguments_carry_fingerprint() {
        let mut manager = UserAgentManager::new();
        let profile = manager.session_profile().clone();
        let args = build_launch_arguments(&profile);

        assert!(args
            .iter()
            .any(|a| a.starts_with("--user-agent=") && a.contains(&profile.user_agent)));
        assert!(args.iter().any(|a| a.starts_with("--window-size=")));
        assert!(args
            .iter()
            .any(|a| a == "--disable-blink-features=AutomationControlled"));
    }

    #[test]
    fn evasions_embed_profile_languages() {
        let mut manager = UserAgentManager::new();
        let profile = manager.session_profile().clone();
        let script = core_evasions(&profile);

        assert!(script.contains("navigator, 'webdriver'"));
        assert!(script.contains(&format!("'{}'", profile.languages[0])));
    }
}
