use serde_json::{Map, Value};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_request::RequestHandle;

/// Validator shape accepted by `use_form`: takes the value bag, returns a
/// bag of field errors.
pub type FormValidator = Callback<Map<String, Value>, Map<String, Value>>;

/// Form hook return type
#[derive(Clone, PartialEq)]
pub struct FormHandle {
    pub values: Map<String, Value>,
    pub errors: Map<String, Value>,
    /// Update one field from a native input's name/value.
    pub handle_change: Callback<Event>,
    /// Update one field by explicit name/value pair, for non-native inputs.
    pub handle_value_change: Callback<(String, Value)>,
    /// Prevent native submission and forward the (projected) bag to the
    /// fetcher's `send`.
    pub handle_submit: Callback<SubmitEvent>,
    pub set_errors: Callback<Map<String, Value>>,
}

/// Hook binding an input bag to a request hook's `send`.
///
/// `validate` is accepted so call sites can already hand one over, but no
/// validator is currently invoked: submission always proceeds with an
/// empty error bag, and validation happens server-side.
///
/// With a `fields` allow-list, submission forwards only those keys; names
/// absent from the bag are omitted rather than sent as null.
#[hook]
pub fn use_form(
    validate: Option<FormValidator>,
    fetcher: RequestHandle,
    default_values: Map<String, Value>,
    fields: Option<Vec<String>>,
) -> FormHandle {
    let _ = validate;
    let values = use_state(|| default_values);
    let errors = use_state(Map::new);

    let handle_change = {
        let values = values.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            next.insert(input.name(), Value::String(input.value()));
            values.set(next);
        })
    };

    let handle_value_change = {
        let values = values.clone();
        Callback::from(move |(name, value): (String, Value)| {
            let mut next = (*values).clone();
            next.insert(name, value);
            values.set(next);
        })
    };

    let handle_submit = {
        let values = values.clone();
        let errors = errors.clone();
        let send = fetcher.send.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            errors.set(Map::new());
            let projected = project_fields(&values, fields.as_deref());
            send.emit(Some(Value::Object(projected)));
        })
    };

    let set_errors = {
        let errors = errors.clone();
        Callback::from(move |next: Map<String, Value>| errors.set(next))
    };

    FormHandle {
        values: (*values).clone(),
        errors: (*errors).clone(),
        handle_change,
        handle_value_change,
        handle_submit,
        set_errors,
    }
}

/// Project the value bag down to an allow-list; keys missing from the bag
/// are dropped, not null-filled.
fn project_fields(
    values: &Map<String, Value>,
    fields: Option<&[String]>,
) -> Map<String, Value> {
    match fields {
        Some(fields) => fields
            .iter()
            .filter_map(|name| {
                values.get(name).map(|value| (name.clone(), value.clone()))
            })
            .collect(),
        None => values.clone(),
    }
}
