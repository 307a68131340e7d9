//! Pure state machines behind the request and session hooks.
//!
//! Every transition lives here, off the rendering framework, so the
//! lifecycle can be audited and unit-tested without a browser. The hooks
//! drive these structs through `use_state` handles.

use payloads::Settlement;
use payloads::requests::LoginCredentials;
use serde_json::{Map, Value};

/// Synthetic status recorded when a request never reached the server.
pub const NETWORK_FAILURE_STATUS: u16 = 418;

/// Lifecycle of one logical HTTP call: idle, armed/sending, settled.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    /// Payload recorded by the last `arm`, consumed at dispatch.
    pub pending_payload: Option<Value>,
    pub data: Value,
    pub errors: Map<String, Value>,
    pub status_code: Option<u16>,
    pub ok: Option<bool>,
    pub is_loading: bool,
    pub should_send: bool,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            pending_payload: None,
            data: Value::Array(Vec::new()),
            errors: Map::new(),
            status_code: None,
            ok: None,
            is_loading: false,
            should_send: false,
        }
    }
}

impl RequestState {
    /// Record the merged payload and request dispatch.
    ///
    /// Re-arming while a send is outstanding overwrites the pending
    /// payload and the later settlement wins; callers that need ordering
    /// must wait for settlement before sending again.
    pub fn arm(&mut self, payload: Option<Value>) {
        self.pending_payload = payload;
        self.should_send = true;
    }

    /// Start of an attempt. Prior status is cleared here so that
    /// `status_code`/`ok` are populated exactly once per completed attempt.
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.status_code = None;
        self.ok = None;
    }

    /// A response arrived, success or HTTP error.
    pub fn settle(&mut self, settlement: Settlement) {
        if let Some(body) = settlement.body {
            if settlement.ok {
                self.data = body;
                self.errors = Map::new();
            } else {
                self.errors = error_bag(body);
            }
        }
        self.status_code = Some(settlement.status_code);
        self.ok = Some(settlement.ok);
    }

    /// The request never reached the server.
    pub fn fail_network(&mut self, message: String) {
        self.ok = Some(false);
        self.status_code = Some(NETWORK_FAILURE_STATUS);
        let mut errors = Map::new();
        errors.insert("network".to_string(), Value::String(message));
        self.errors = errors;
    }

    /// End of an attempt, regardless of outcome.
    pub fn finish(&mut self) {
        self.is_loading = false;
        self.should_send = false;
    }

    /// Back to idle, discarding any settled result.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Shallow merge of JSON objects: `extra` keys win over `base` keys, and a
/// missing side passes the other through untouched.
pub fn merge_payload(
    base: Option<&Value>,
    extra: Option<Value>,
) -> Option<Value> {
    match (base, extra) {
        (Some(Value::Object(base)), Some(Value::Object(extra))) => {
            let mut merged = base.clone();
            for (key, value) in extra {
                merged.insert(key, value);
            }
            Some(Value::Object(merged))
        }
        (_, Some(extra)) => Some(extra),
        (base, None) => base.cloned(),
    }
}

/// Server error bodies map field names to messages; anything else is kept
/// whole under a single `detail` key.
fn error_bag(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("detail".to_string(), other);
            map
        }
    }
}

/// Which authentication call is in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthAction {
    #[default]
    None,
    Login,
    Logout,
}

impl AuthAction {
    /// Path segment under `auth/` for the dispatched action.
    pub fn path_segment(&self) -> &'static str {
        match self {
            AuthAction::None => "",
            AuthAction::Login => "login",
            AuthAction::Logout => "logout",
        }
    }
}

/// Session layered over the request lifecycle: the recorded action, the
/// credential bag, and the derived logged-in flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub action: AuthAction,
    pub credentials: Option<LoginCredentials>,
    pub logged_in: bool,
}

impl SessionState {
    /// Record a login attempt. Dispatch is gated separately through
    /// `should_dispatch`, so an empty email leaves the session armed but
    /// silent.
    pub fn begin_login(&mut self, email: String, password: String) {
        self.action = AuthAction::Login;
        self.credentials = Some(LoginCredentials { email, password });
    }

    /// Record a logout. The flag drops optimistically, before any server
    /// response, and no settlement outcome turns it back on.
    pub fn begin_logout(&mut self) {
        self.action = AuthAction::Logout;
        self.credentials = None;
        self.logged_in = false;
    }

    /// Whether the recorded action may hit the network: login needs a
    /// non-empty email, logout always goes, idle never does.
    pub fn should_dispatch(&self) -> bool {
        match self.action {
            AuthAction::None => false,
            AuthAction::Login => self
                .credentials
                .as_ref()
                .is_some_and(LoginCredentials::has_email),
            AuthAction::Logout => true,
        }
    }

    /// Auth path for the recorded action, e.g. `auth/login/`.
    pub fn action_path(&self) -> String {
        format!("auth/{}/", self.action.path_segment())
    }

    /// Credential bag serialized for the request body.
    pub fn payload(&self) -> Option<Value> {
        self.credentials
            .as_ref()
            .and_then(|c| serde_json::to_value(c).ok())
    }

    /// Apply a settled request to the session.
    ///
    /// An `ok` login grants the flag; a 401 from anywhere, or an `ok`
    /// logout, revokes it. Any explicit failure returns the session to
    /// idle, whichever action was in flight.
    pub fn apply_settlement(
        &mut self,
        status_code: Option<u16>,
        ok: Option<bool>,
    ) {
        if ok == Some(true) && self.action == AuthAction::Login {
            self.logged_in = true;
        } else if status_code == Some(401)
            || (self.action == AuthAction::Logout && ok == Some(true))
        {
            self.logged_in = false;
        }
        if ok == Some(false) {
            self.action = AuthAction::None;
            self.credentials = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settled(status_code: u16, ok: bool, body: Option<Value>) -> Settlement {
        Settlement {
            status_code,
            ok,
            body,
        }
    }

    #[test]
    fn merge_extra_keys_win() {
        let base = json!({"a": 1, "b": 2});
        let extra = json!({"b": 3, "c": 4});
        assert_eq!(
            merge_payload(Some(&base), Some(extra)),
            Some(json!({"a": 1, "b": 3, "c": 4}))
        );
    }

    #[test]
    fn merge_missing_sides_pass_through() {
        let base = json!({"a": 1});
        assert_eq!(merge_payload(Some(&base), None), Some(json!({"a": 1})));
        assert_eq!(
            merge_payload(None, Some(json!({"b": 2}))),
            Some(json!({"b": 2}))
        );
        assert_eq!(merge_payload(None, None), None);
    }

    #[test]
    fn send_lifecycle_success() {
        let mut state = RequestState::default();
        state.arm(Some(json!({"q": "x"})));
        assert!(state.should_send);
        state.begin();
        assert!(state.is_loading);
        assert_eq!(state.status_code, None);
        assert_eq!(state.ok, None);

        state.settle(settled(200, true, Some(json!({"id": 7}))));
        state.finish();
        assert_eq!(state.data, json!({"id": 7}));
        assert!(state.errors.is_empty());
        assert_eq!(state.status_code, Some(200));
        assert_eq!(state.ok, Some(true));
        assert!(!state.is_loading);
        assert!(!state.should_send);
    }

    #[test]
    fn http_error_body_routes_to_errors() {
        let mut state = RequestState::default();
        state.begin();
        state.settle(settled(
            400,
            false,
            Some(json!({"email": "This field is required."})),
        ));
        state.finish();
        assert_eq!(state.data, json!([]));
        assert_eq!(
            state.errors.get("email"),
            Some(&json!("This field is required."))
        );
        assert_eq!(state.ok, Some(false));
    }

    #[test]
    fn non_object_error_body_lands_under_detail() {
        let mut state = RequestState::default();
        state.begin();
        state.settle(settled(500, false, Some(json!("server exploded"))));
        assert_eq!(state.errors.get("detail"), Some(&json!("server exploded")));
    }

    #[test]
    fn bodyless_response_records_status_only() {
        let mut state = RequestState::default();
        state.data = json!({"kept": true});
        state.begin();
        state.settle(settled(204, true, None));
        assert_eq!(state.data, json!({"kept": true}));
        assert_eq!(state.status_code, Some(204));
        assert_eq!(state.ok, Some(true));
    }

    #[test]
    fn network_failure_is_synthetic_teapot() {
        let mut state = RequestState::default();
        state.begin();
        state.fail_network(
            "Could not connect to server. Check your connection.".to_string(),
        );
        state.finish();
        assert_eq!(state.status_code, Some(NETWORK_FAILURE_STATUS));
        assert_eq!(state.ok, Some(false));
        assert_eq!(
            state.errors.get("network"),
            Some(&json!("Could not connect to server. Check your connection."))
        );
        assert!(!state.is_loading);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = RequestState::default();
        state.arm(Some(json!({"a": 1})));
        state.begin();
        state.settle(settled(403, false, Some(json!({"detail": "no"}))));
        state.clear();
        assert_eq!(state, RequestState::default());
        assert_eq!(state.data, json!([]));
        assert!(state.errors.is_empty());
        assert_eq!(state.status_code, None);
        assert_eq!(state.ok, None);
        assert!(!state.is_loading);
    }

    #[test]
    fn session_starts_logged_out() {
        assert!(!SessionState::default().logged_in);
    }

    #[test]
    fn login_settling_ok_grants_flag() {
        let mut session = SessionState::default();
        session.begin_login("a@b.com".to_string(), "pw".to_string());
        assert!(session.should_dispatch());
        assert_eq!(session.action_path(), "auth/login/");
        assert_eq!(
            session.payload(),
            Some(json!({"email": "a@b.com", "password": "pw"}))
        );

        session.apply_settlement(Some(200), Some(true));
        assert!(session.logged_in);
        assert_eq!(session.action, AuthAction::Login);
    }

    #[test]
    fn login_with_empty_email_never_dispatches() {
        let mut session = SessionState::default();
        session.begin_login(String::new(), "pw".to_string());
        assert!(!session.should_dispatch());
    }

    #[test]
    fn login_failure_returns_to_idle() {
        let mut session = SessionState::default();
        session.begin_login("a@b.com".to_string(), "bad".to_string());
        session.apply_settlement(Some(400), Some(false));
        assert!(!session.logged_in);
        assert_eq!(session.action, AuthAction::None);
        assert!(session.credentials.is_none());
    }

    #[test]
    fn logout_drops_flag_before_any_response() {
        let mut session = SessionState {
            logged_in: true,
            ..Default::default()
        };
        session.begin_logout();
        assert!(!session.logged_in);
        assert!(session.credentials.is_none());
        assert!(session.should_dispatch());
        assert_eq!(session.action_path(), "auth/logout/");

        // Whatever the server answers, the flag stays down.
        session.apply_settlement(Some(200), Some(true));
        assert!(!session.logged_in);
    }

    #[test]
    fn unauthorized_forces_flag_down_regardless_of_action() {
        let mut session = SessionState {
            logged_in: true,
            ..Default::default()
        };
        session.begin_login("a@b.com".to_string(), "pw".to_string());
        session.apply_settlement(Some(401), Some(false));
        assert!(!session.logged_in);
        assert_eq!(session.action, AuthAction::None);
    }

    #[test]
    fn idle_session_never_dispatches() {
        assert!(!SessionState::default().should_dispatch());
    }
}
