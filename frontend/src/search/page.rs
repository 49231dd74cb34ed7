use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiError;
use crate::cache::use_cache;
use crate::layout::{ErrorBanner, SiteFooter, SiteHeader, Spinner};
use crate::models::SearchResponse;
use crate::router::{Route, SearchParams};
use crate::search::api::{fetch_next_page, search_videos};
use crate::search::components::{RelatedSearches, ResultsGrid};
use crate::search::pagination::{
    append_page_for, cached_search, display_count, remember_results, remember_search,
};

#[function_component(SearchPage)]
pub fn search_page() -> Html {
    let cache = use_cache();
    let navigator = use_navigator();
    let params = use_location()
        .and_then(|location| location.query::<SearchParams>().ok())
        .unwrap_or_default();
    let query = params.q.trim().to_string();

    let search_data = use_state(|| None::<SearchResponse>);
    let loading = use_state(|| params.force_reload());
    let loading_more = use_state(|| false);
    let error = use_state(|| None::<ApiError>);
    // Bumped by "Try Again"; any non-zero attempt skips the cache.
    let attempt = use_state(|| 0u32);
    // Responses for any other query are stale.
    let shown_query = use_mut_ref(String::new);
    *shown_query.borrow_mut() = query.clone();

    {
        let cache = cache.clone();
        let search_data = search_data.clone();
        let loading = loading.clone();
        let error = error.clone();
        let shown_query = shown_query.clone();
        let force_reload = params.force_reload();

        use_effect_with((query.clone(), *attempt), move |(query, attempt)| {
            let query = query.clone();
            if query.is_empty() {
                loading.set(false);
                return;
            }

            error.set(None);
            if *attempt == 0 {
                if let Some(cached) = cached_search(&cache, &query, force_reload) {
                    search_data.set(Some(cached));
                    loading.set(false);
                    return;
                }
            }

            loading.set(true);

            if force_reload {
                if let Some(navigator) = &navigator {
                    if let Err(e) =
                        navigator.replace_with_query(&Route::Search, &SearchParams::cached(&query))
                    {
                        log::warn!("Could not drop loading flag from URL: {e}");
                    }
                }
            }

            spawn_local(async move {
                let result = search_videos(&query).await;
                if *shown_query.borrow() != query {
                    log::debug!("Ignoring stale results for '{query}'");
                    return;
                }
                match result {
                    Ok(response) => {
                        remember_search(&cache, &query, &response);
                        search_data.set(Some(response));
                    }
                    Err(e) => {
                        log::error!("Error fetching search results: {e}");
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
        });
    }

    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |_: MouseEvent| attempt.set(*attempt + 1))
    };

    let on_load_more = {
        let cache = cache.clone();
        let query = query.clone();
        let shown_query = shown_query.clone();
        let search_data = search_data.clone();
        let loading_more = loading_more.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = (*search_data).clone() else {
                return;
            };
            let Some(token) = current.pagination.next_token().map(str::to_string) else {
                return;
            };

            let cache = cache.clone();
            let requested = query.clone();
            let shown_query = shown_query.clone();
            let search_data = search_data.clone();
            let loading_more = loading_more.clone();
            let error = error.clone();
            loading_more.set(true);
            spawn_local(async move {
                let result = fetch_next_page(&token).await;
                loading_more.set(false);
                let shown = shown_query.borrow().clone();
                match result {
                    Ok(page) => {
                        if let Some(merged) = append_page_for(&shown, &requested, &current, page) {
                            remember_results(&cache, &requested, &merged);
                            search_data.set(Some(merged));
                        }
                    }
                    Err(e) if shown == requested => {
                        log::error!("Error fetching next page: {e}");
                        error.set(Some(e));
                    }
                    Err(e) => log::debug!("Ignoring next page error for '{requested}': {e}"),
                }
            });
        })
    };

    let body = if *loading {
        html! { <Spinner label={"Searching for nature footage...".to_string()} /> }
    } else if let Some(e) = &*error {
        html! {
            <div class="max-w-2xl mx-auto py-10">
                <ErrorBanner message={e.message()} details={e.details()} on_retry={on_retry} />
            </div>
        }
    } else if let Some(data) = (*search_data).as_ref().filter(|data| !data.results.is_empty()) {
        html! {
            <>
                <ResultsGrid results={data.results.clone()} />
                if data.pagination.has_more {
                    <div class="flex justify-center mt-12">
                        <button
                            class={classes!(
                                "px-6", "py-2", "border", "border-gray-300", "rounded-lg", "text-gray-700",
                                "hover:bg-gray-50", "transition-colors",
                                (*loading_more).then_some("opacity-50 cursor-not-allowed")
                            )}
                            onclick={on_load_more}
                            disabled={*loading_more}
                        >
                            { if *loading_more {
                                "Loading more results...".to_string()
                            } else {
                                format!("Load More Results ({})", display_count(data))
                            } }
                        </button>
                    </div>
                }
            </>
        }
    } else {
        html! {
            <div class="text-center py-10">
                <p class="text-gray-500">
                    { if query.is_empty() {
                        "Enter a search term to find videos"
                    } else {
                        "No videos found matching your search. Try a different search term."
                    } }
                </p>
            </div>
        }
    };

    let title = if query.is_empty() {
        "Video Stock Footage".to_string()
    } else {
        format!("{query} Video Stock Footage")
    };

    html! {
        <div class="min-h-screen flex flex-col bg-white">
            <SiteHeader />
            <main class="flex-grow container mx-auto px-4 py-8">
                <div class="mb-8">
                    <h1 class="text-4xl font-bold mb-2">{ title }</h1>
                    <p class="text-gray-700">{"750+ Leading Nature and Underwater Video Professionals"}</p>
                    <p class="text-gray-700">{"Over 6,000 Species Worldwide!"}</p>
                    <div class="flex justify-between items-center mt-4">
                        <div class="flex items-center gap-4 text-sm text-gray-600">
                            <span>{"RF Royalty Free"}</span>
                            <span>{"RM Rights Managed"}</span>
                            <span>{"4K Ultra HD"}</span>
                        </div>
                        if let Some(data) = (*search_data).as_ref().filter(|_| !*loading) {
                            <div class="text-sm text-gray-600">
                                {"Showing "}<span class="font-medium">{ display_count(data) }</span>{" results"}
                            </div>
                        }
                    </div>
                </div>
                <RelatedSearches />
                { body }
            </main>
            <SiteFooter />
        </div>
    }
}
