use payloads::APIClient;
use serde_json::Value;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod config;
pub mod csrf;
pub mod hooks;
mod logs;
pub mod state;

use components::{ContactForm, LoginForm};

/// Global API client - address and cookie policy fixed at startup
pub fn get_api_client() -> APIClient {
    APIClient {
        address: config::api_address(),
        credentials: config::credentials_policy(),
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <HomeContent />
            </main>
        },
        Route::Login => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="flex items-center justify-center min-h-[60vh]">
                    <LoginForm />
                </div>
            </main>
        },
        Route::Contact => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="flex items-center justify-center min-h-[60vh]">
                    <ContactForm />
                </div>
            </main>
        },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}

/// Home page body, pulled from the content endpoint on first render.
#[function_component]
fn HomeContent() -> Html {
    let content = hooks::use_get_content("home/");

    {
        let send = content.send.clone();
        use_effect_with((), move |_| send.emit(None));
    }

    if content.is_loading {
        return html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Loading..."}
                </p>
            </div>
        };
    }

    if content.ok == Some(false) {
        return html! {
            <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">
                    {"Could not load this page."}
                </p>
            </div>
        };
    }

    let title = content
        .data
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("Home")
        .to_string();
    let body = content
        .data
        .get("body")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold text-neutral-900 dark:text-white">
                {title}
            </h1>
            <p class="text-neutral-600 dark:text-neutral-400">
                {body}
            </p>
        </div>
    }
}
