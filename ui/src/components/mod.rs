pub mod contact_form;
pub mod login_form;

pub use contact_form::ContactForm;
pub use login_form::LoginForm;

use serde_json::{Map, Value};

/// Flatten a server error bag into displayable lines. Bodies arrive either
/// as `{"field": "message"}` or `{"field": ["message", ...]}`.
pub(crate) fn error_messages(errors: &Map<String, Value>) -> Vec<String> {
    errors
        .values()
        .flat_map(|value| match value {
            Value::String(message) => vec![message.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            other => vec![other.to_string()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_strings_and_arrays() {
        let errors = match json!({
            "email": ["Enter a valid email address."],
            "network": "Could not connect to server. Check your connection."
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut messages = error_messages(&errors);
        messages.sort();
        assert_eq!(
            messages,
            vec![
                "Could not connect to server. Check your connection."
                    .to_string(),
                "Enter a valid email address.".to_string(),
            ]
        );
    }
}
