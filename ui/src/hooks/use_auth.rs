use reqwest::Method;
use serde_json::{Map, Value};
use yew::prelude::*;

use crate::hooks::use_request::drive_dispatch;
use crate::state::{RequestState, SessionState};

/// Session hook return type
#[derive(Clone, PartialEq)]
pub struct AuthHandle {
    pub logged_in: bool,
    pub is_loading: bool,
    pub status_code: Option<u16>,
    pub data: Value,
    pub errors: Map<String, Value>,
    /// Dispatch `POST auth/login/` with `(email, password)`. An empty
    /// email is a silent no-op.
    pub login: Callback<(String, String)>,
    /// Drop the session flag immediately and dispatch `POST auth/logout/`.
    pub logout: Callback<()>,
    /// Raw override of the session flag, for ad-hoc local updates.
    pub set_logged_in: Callback<bool>,
}

/// Hook fixing the request lifecycle to the authentication endpoints and
/// layering the derived logged-in flag on top.
///
/// The flag starts false on mount. It is granted only by an `ok` login
/// settlement, and revoked by an `ok` logout, by any 401, or optimistically
/// the moment `logout` is invoked.
#[hook]
pub fn use_auth() -> AuthHandle {
    let request = use_state(RequestState::default);
    let session = use_state(SessionState::default);

    let login = {
        let request = request.clone();
        let session = session.clone();
        Callback::from(move |(email, password): (String, String)| {
            let mut next = (*session).clone();
            next.begin_login(email, password);
            session.set(next.clone());
            if !next.should_dispatch() {
                // Submitting without an email is a caller bug; it surfaces
                // as a no-op rather than an error.
                return;
            }
            dispatch_action(
                next,
                (*request).clone(),
                request.clone(),
                session.clone(),
            );
        })
    };

    let logout = {
        let request = request.clone();
        let session = session.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.begin_logout();
            session.set(next.clone());
            // Prior result state is discarded along with the flag.
            request.set(RequestState::default());
            dispatch_action(
                next,
                RequestState::default(),
                request.clone(),
                session.clone(),
            );
        })
    };

    let set_logged_in = {
        let session = session.clone();
        Callback::from(move |logged_in: bool| {
            let mut next = (*session).clone();
            next.logged_in = logged_in;
            session.set(next);
        })
    };

    AuthHandle {
        logged_in: session.logged_in,
        is_loading: request.is_loading,
        status_code: request.status_code,
        data: request.data.clone(),
        errors: request.errors.clone(),
        login,
        logout,
        set_logged_in,
    }
}

/// Arm the request for the recorded action, drive it to settlement, and
/// fold the outcome back into the session through its transition table.
fn dispatch_action(
    session_state: SessionState,
    base_request: RequestState,
    request: UseStateHandle<RequestState>,
    session: UseStateHandle<SessionState>,
) {
    let client = crate::get_api_client();
    let url = client.api_url(&session_state.action_path());

    let mut next = base_request;
    next.arm(session_state.payload());
    next.begin();
    request.set(next.clone());

    drive_dispatch(client, Method::POST, url, next, request, move |settled| {
        let mut next_session = session_state;
        next_session.apply_settlement(settled.status_code, settled.ok);
        session.set(next_session);
    });
}
