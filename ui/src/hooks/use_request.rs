use payloads::APIClient;
use reqwest::Method;
use serde_json::{Map, Value};
use yew::prelude::*;

use crate::csrf;
use crate::state::{RequestState, merge_payload};

/// Generic request hook return type
#[derive(Clone, PartialEq)]
pub struct RequestHandle {
    pub data: Value,
    pub errors: Map<String, Value>,
    pub status_code: Option<u16>,
    pub ok: Option<bool>,
    pub is_loading: bool,
    /// Merge the given payload over the hook's base payload and dispatch.
    pub send: Callback<Option<Value>>,
    /// Reset to idle, discarding any settled result.
    pub clear: Callback<()>,
    /// Raw override of the result data, for ad-hoc local updates.
    pub set_data: Callback<Value>,
}

/// Hook owning the lifecycle of one logical HTTP call.
///
/// `base_payload` sits under any payload handed to `send`; extra keys win
/// on a shallow merge. One network attempt per `send`, no retries; the
/// caller decides whether to send again. A second `send` before settlement
/// is not guarded: both attempts run and the later settlement wins.
#[hook]
pub fn use_request(
    method: Method,
    url: String,
    base_payload: Option<Value>,
) -> RequestHandle {
    let state = use_state(RequestState::default);

    let send = {
        let state = state.clone();
        let method = method.clone();
        let url = url.clone();
        Callback::from(move |extra: Option<Value>| {
            let mut next = (*state).clone();
            next.arm(merge_payload(base_payload.as_ref(), extra));
            next.begin();
            state.set(next.clone());
            drive_dispatch(
                crate::get_api_client(),
                method.clone(),
                url.clone(),
                next,
                state.clone(),
                |_| {},
            );
        })
    };

    let clear = {
        let state = state.clone();
        Callback::from(move |_| {
            let mut next = (*state).clone();
            next.clear();
            state.set(next);
        })
    };

    let set_data = {
        let state = state.clone();
        Callback::from(move |data: Value| {
            let mut next = (*state).clone();
            next.data = data;
            state.set(next);
        })
    };

    RequestHandle {
        data: state.data.clone(),
        errors: state.errors.clone(),
        status_code: state.status_code,
        ok: state.ok,
        is_loading: state.is_loading,
        send,
        clear,
        set_data,
    }
}

/// Drive one armed attempt to settlement, then hand the settled state to
/// `on_settled` (the session hook layers its transition there).
///
/// The CSRF token is read fresh for every state-changing call and travels
/// in this call's own header map; nothing is shared between dispatches.
pub(crate) fn drive_dispatch<F>(
    client: APIClient,
    method: Method,
    url: String,
    mut state: RequestState,
    handle: UseStateHandle<RequestState>,
    on_settled: F,
) where
    F: FnOnce(&RequestState) + 'static,
{
    let csrf_token = if method == Method::GET {
        None
    } else {
        csrf::token()
    };

    yew::platform::spawn_local(async move {
        let outcome = client
            .dispatch(
                method,
                &url,
                state.pending_payload.as_ref(),
                csrf_token.as_deref(),
            )
            .await;
        match outcome {
            Ok(settlement) => state.settle(settlement),
            Err(err) => {
                tracing::error!(error = %err, url = %url, "request never reached the server");
                state.fail_network(err.to_string());
            }
        }
        state.finish();
        handle.set(state.clone());
        on_settled(&state);
    });
}

/// GET from the API base.
#[hook]
pub fn use_get(path: &str) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::GET, client.api_url(path), None)
}

/// GET from the content base.
#[hook]
pub fn use_get_content(path: &str) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::GET, client.content_url(path), None)
}

#[hook]
pub fn use_post(path: &str, data: Option<Value>) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::POST, client.api_url(path), data)
}

#[hook]
pub fn use_put(path: &str, data: Option<Value>) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::PUT, client.api_url(path), data)
}

#[hook]
pub fn use_patch(path: &str, data: Option<Value>) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::PATCH, client.api_url(path), data)
}

#[hook]
pub fn use_delete(path: &str) -> RequestHandle {
    let client = crate::get_api_client();
    use_request(Method::DELETE, client.api_url(path), None)
}
