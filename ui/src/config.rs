//! Build-time API origin configuration.

use payloads::CredentialsPolicy;

/// The backend origin. `API_PROTOCOL`/`API_HOST` are baked in at compile
/// time; without them the UI talks to its own origin, which is the
/// deployed setup.
pub fn api_address() -> String {
    match (option_env!("API_PROTOCOL"), option_env!("API_HOST")) {
        (Some(protocol), Some(host)) => format!("{protocol}://{host}"),
        _ => {
            let window = web_sys::window().unwrap();
            window.location().origin().unwrap()
        }
    }
}

/// Cookie policy for API calls, decided once from the configured protocol.
pub fn credentials_policy() -> CredentialsPolicy {
    credentials_policy_for(option_env!("API_PROTOCOL").unwrap_or("https"))
}

/// Secure deployments stay same-origin; plain-http development runs the UI
/// and API on different origins and needs cookies included cross-origin.
fn credentials_policy_for(protocol: &str) -> CredentialsPolicy {
    if protocol == "https" {
        CredentialsPolicy::SameOrigin
    } else {
        CredentialsPolicy::Include
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_stays_same_origin() {
        assert_eq!(
            credentials_policy_for("https"),
            CredentialsPolicy::SameOrigin
        );
    }

    #[test]
    fn plain_http_includes_cookies() {
        assert_eq!(credentials_policy_for("http"), CredentialsPolicy::Include);
    }
}
