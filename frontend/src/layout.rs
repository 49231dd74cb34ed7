use yew::prelude::*;
use yew_router::prelude::*;

use crate::env_variable_utils::get_app_name;
use crate::router::Route;
use crate::search::SearchBar;

#[function_component(SiteHeader)]
pub fn site_header() -> Html {
    html! {
        <header class="backdrop-blur-md bg-white/90 sticky top-0 z-50 border-b border-gray-100">
            <div class="container mx-auto px-4 py-3 flex items-center justify-between">
                <div class="flex items-center gap-8">
                    <Link<Route> to={Route::Home} classes="flex items-center">
                        <img src="/logo.jpg" alt={get_app_name()} width="50" height="50" class="mr-2 rounded-full" />
                        <span class="text-xl font-bold text-brand-teal-600">
                            {"Nature"}<span class="text-brand-green-600">{"Footage"}</span>
                        </span>
                    </Link<Route>>
                    <div class="hidden md:block w-96">
                        <SearchBar />
                    </div>
                </div>
                <nav class="hidden md:flex items-center gap-6">
                    <a href="/#browse" class="text-gray-700 hover:text-brand-teal transition-colors">{"Browse"}</a>
                    <a href="https://www.naturefootage.com/overview" target="_blank" rel="noopener noreferrer"
                       class="text-gray-700 hover:text-brand-teal transition-colors">{"Contribute"}</a>
                    <a href="https://www.naturefootage.com/free-research#" target="_blank" rel="noopener noreferrer"
                       class="text-gray-700 hover:text-brand-teal transition-colors">{"Services"}</a>
                </nav>
            </div>
            <div class="md:hidden container mx-auto px-4 pb-3">
                <SearchBar />
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    #[prop_or_default]
    pub details: Option<String>,
    #[prop_or_default]
    pub on_retry: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<MouseEvent>>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-md mb-4">
            <p class="font-medium">{ &props.message }</p>
            if let Some(details) = &props.details {
                <p class="mt-2 text-sm text-red-600">{ details }</p>
            }
            <div class="mt-3 flex gap-2">
                if let Some(on_retry) = &props.on_retry {
                    <button onclick={on_retry.clone()}
                        class="px-4 py-2 bg-brand-teal-500 text-white rounded-md hover:bg-brand-teal-600 transition-colors">
                        {"Try Again"}
                    </button>
                }
                if let Some(on_dismiss) = &props.on_dismiss {
                    <button onclick={on_dismiss.clone()}
                        class="px-3 py-1 text-sm text-red-700 hover:underline">
                        {"Dismiss"}
                    </button>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: String,
}

/// Informational, non-error message.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    html! {
        <div class="bg-yellow-50 border border-yellow-200 text-yellow-800 px-4 py-3 rounded-md mb-4">
            { &props.message }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub label: Option<String>,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-12">
            <div class="h-12 w-12 border-4 border-brand-teal-500 border-t-transparent rounded-full animate-spin"></div>
            if let Some(label) = &props.label {
                <p class="mt-6 text-lg text-brand-teal-600 font-medium">{ label }</p>
            }
        </div>
    }
}

#[function_component(SiteFooter)]
pub fn site_footer() -> Html {
    html! {
        <footer class="bg-white py-8 border-t border-gray-100">
            <div class="container mx-auto px-4">
                <div class="flex items-center mb-4">
                    <img src="/logo.jpg" alt={get_app_name()} width="60" height="60" class="mr-3 rounded-full" />
                    <div>
                        <h3 class="text-xl font-bold text-brand-teal-600">
                            {"Nature"}<span class="text-brand-green-600">{"Footage"}</span>
                        </h3>
                        <p class="text-sm text-gray-500">{"Premium nature footage"}</p>
                    </div>
                </div>
                <p class="text-gray-600 mt-2">{"High-quality video assets for your creative projects."}</p>
                <div class="mt-8 pt-6 border-t">
                    <p class="text-gray-500 text-sm">{"© 2025 NatureFootage, Inc. All Rights Reserved"}</p>
                </div>
            </div>
        </footer>
    }
}
