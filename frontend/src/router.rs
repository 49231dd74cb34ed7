use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::detail::DetailPage;
use crate::home::HomePage;
use crate::search::SearchPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/search")]
    Search,
    #[at("/detail/:id")]
    Detail { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query string of the search page: `?q=<query>&loading=true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
}

impl SearchParams {
    /// A search typed by the user; always hits the backend.
    pub fn fresh(query: &str) -> Self {
        Self {
            q: query.to_string(),
            loading: Some("true".to_string()),
        }
    }

    /// A link to a query whose cached results may be reused.
    pub fn cached(query: &str) -> Self {
        Self {
            q: query.to_string(),
            loading: None,
        }
    }

    pub fn force_reload(&self) -> bool {
        self.loading.as_deref() == Some("true")
    }
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Search => html! { <SearchPage /> },
        Route::Detail { id } => html! { <DetailPage id={id} /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-50">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-brand-teal-600 hover:underline">
                        {"Go back to search"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

/// Pushes `/search?q=..&loading=true`. Blank queries are ignored.
pub fn navigate_to_search(navigator: &Navigator, query: &str) {
    let query = query.trim();
    if query.is_empty() {
        return;
    }
    if let Err(e) = navigator.push_with_query(&Route::Search, &SearchParams::fresh(query)) {
        log::error!("Failed to navigate to search: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_flag_forces_reload() {
        assert!(SearchParams::fresh("octopus").force_reload());
        assert!(!SearchParams::cached("octopus").force_reload());
        let other = SearchParams {
            q: "octopus".into(),
            loading: Some("false".into()),
        };
        assert!(!other.force_reload());
    }
}
