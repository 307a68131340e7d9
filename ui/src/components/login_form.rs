use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::error_messages;
use crate::hooks::use_auth;

#[function_component]
pub fn LoginForm() -> Html {
    let auth = use_auth();

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let local_error = use_state(|| None::<String>);

    let on_submit = {
        let login = auth.login.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let local_error = local_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let email_input = email_ref.cast::<HtmlInputElement>().unwrap();
            let password_input =
                password_ref.cast::<HtmlInputElement>().unwrap();

            let email = email_input.value();
            let password = password_input.value();

            if email.is_empty() || password.is_empty() {
                local_error.set(Some(
                    "Please enter both email and password".to_string(),
                ));
                return;
            }

            local_error.set(None);
            login.emit((email, password));
        })
    };

    let on_logout = {
        let logout = auth.logout.clone();
        Callback::from(move |_: MouseEvent| logout.emit(()))
    };

    if auth.logged_in {
        return html! {
            <div class="max-w-md w-full space-y-4">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"You are signed in."}
                </p>
                <button
                    onclick={on_logout}
                    class="w-full py-2 px-4 rounded-md bg-neutral-900 dark:bg-neutral-100 text-white dark:text-neutral-900 hover:bg-neutral-700 dark:hover:bg-neutral-300"
                >
                    {"Sign out"}
                </button>
            </div>
        };
    }

    let server_errors = error_messages(&auth.errors);

    html! {
        <form onsubmit={on_submit} class="max-w-md w-full space-y-4">
            <div>
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-white">
                    {"Sign in"}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400 mt-2">
                    {"Use the email address on your account"}
                </p>
            </div>

            { if let Some(message) = (*local_error).clone() {
                html! {
                    <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {message}
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
                <label for="email" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                    {"Email"}
                </label>
                <input
                    ref={email_ref}
                    id="email"
                    name="email"
                    type="email"
                    class="mt-1 w-full px-3 py-2 rounded-md border border-neutral-300 dark:border-neutral-700 bg-white dark:bg-neutral-800"
                />
            </div>
            <div>
                <label for="password" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                    {"Password"}
                </label>
                <input
                    ref={password_ref}
                    id="password"
                    name="password"
                    type="password"
                    class="mt-1 w-full px-3 py-2 rounded-md border border-neutral-300 dark:border-neutral-700 bg-white dark:bg-neutral-800"
                />
            </div>

            <button
                type="submit"
                disabled={auth.is_loading}
                class="w-full py-2 px-4 rounded-md bg-neutral-900 dark:bg-neutral-100 text-white dark:text-neutral-900 hover:bg-neutral-700 dark:hover:bg-neutral-300 disabled:opacity-50"
            >
                { if auth.is_loading { "Signing in..." } else { "Sign in" } }
            </button>
        </form>
    }
}
