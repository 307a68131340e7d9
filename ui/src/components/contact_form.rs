use serde_json::{Map, Value};
use yew::prelude::*;

use super::error_messages;
use crate::hooks::{use_form, use_post};

/// Contact form: an input bag bound straight to `POST contact/`. Only the
/// allow-listed fields travel, whatever else ends up in the bag.
#[function_component]
pub fn ContactForm() -> Html {
    let fetcher = use_post("contact/", None);
    let form = use_form(
        None,
        fetcher.clone(),
        Map::new(),
        Some(vec![
            "name".to_string(),
            "email".to_string(),
            "message".to_string(),
        ]),
    );

    let field_value = |name: &str| -> String {
        form.values
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let sent = fetcher.ok == Some(true);
    let server_errors = error_messages(&fetcher.errors);

    html! {
        <form onsubmit={form.handle_submit.clone()} class="max-w-md w-full space-y-4">
            <div>
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-white">
                    {"Contact us"}
                </h1>
            </div>

            { if sent {
                html! {
                    <div class="p-4 rounded-md bg-green-50 dark:bg-green-900/20 border border-green-200 dark:border-green-800">
                        <p class="text-sm text-green-700 dark:text-green-400">
                            {"Thanks, your message has been sent."}
                        </p>
                    </div>
                }
            } else {
                html! {}
            }}
            { for server_errors.iter().map(|message| html! {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {message.clone()}
                    </p>
                </div>
            })}

            <div>
                <label for="name" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                    {"Name"}
                </label>
                <input
                    id="name"
                    name="name"
                    type="text"
                    value={field_value("name")}
                    onchange={form.handle_change.clone()}
                    class="mt-1 w-full px-3 py-2 rounded-md border border-neutral-300 dark:border-neutral-700 bg-white dark:bg-neutral-800"
                />
            </div>
            <div>
                <label for="email" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                    {"Email"}
                </label>
                <input
                    id="email"
                    name="email"
                    type="email"
                    value={field_value("email")}
                    onchange={form.handle_change.clone()}
                    class="mt-1 w-full px-3 py-2 rounded-md border border-neutral-300 dark:border-neutral-700 bg-white dark:bg-neutral-800"
                />
            </div>
            <div>
                <label for="message" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                    {"Message"}
                </label>
                <input
                    id="message"
                    name="message"
                    type="text"
                    value={field_value("message")}
                    onchange={form.handle_change.clone()}
                    class="mt-1 w-full px-3 py-2 rounded-md border border-neutral-300 dark:border-neutral-700 bg-white dark:bg-neutral-800"
                />
            </div>

            <button
                type="submit"
                disabled={fetcher.is_loading}
                class="w-full py-2 px-4 rounded-md bg-neutral-900 dark:bg-neutral-100 text-white dark:text-neutral-900 hover:bg-neutral-700 dark:hover:bg-neutral-300 disabled:opacity-50"
            >
                { if fetcher.is_loading { "Sending..." } else { "Send" } }
            </button>
        </form>
    }
}
