//! CSRF token retrieval.
//!
//! The backend session sets a `csrftoken` cookie; state-changing requests
//! echo it back in the `X-CSRFToken` header. This layer only ever reads
//! the cookie, it never writes it.

/// The cookie the backend stores the CSRF token under.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Read the CSRF token from the document cookie jar.
#[cfg(target_arch = "wasm32")]
pub fn token() -> Option<String> {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    parse_cookie_value(&cookies, CSRF_COOKIE_NAME)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn token() -> Option<String> {
    None
}

/// Pick one value out of a `name1=value1; name2=value2` cookie string.
pub fn parse_cookie_value(cookies: &str, name: &str) -> Option<String> {
    for part in cookies.split(';') {
        if let Some((key, value)) = part.trim().split_once('=')
            && key.trim() == name
        {
            return Some(value.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let cookies = "sessionid=abc123; csrftoken=xyz789; theme=dark";
        assert_eq!(
            parse_cookie_value(cookies, CSRF_COOKIE_NAME),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn tolerates_whitespace() {
        let cookies = " csrftoken = tok123 ; other = value ";
        assert_eq!(
            parse_cookie_value(cookies, CSRF_COOKIE_NAME),
            Some("tok123".to_string())
        );
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(parse_cookie_value("sessionid=abc", CSRF_COOKIE_NAME), None);
        assert_eq!(parse_cookie_value("", CSRF_COOKIE_NAME), None);
    }
}
