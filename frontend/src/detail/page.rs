use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiError;
use crate::cache::use_cache;
use crate::detail::api::load_similar_videos;
use crate::detail::components::{ClipList, SimilarGrid};
use crate::detail::metadata::VideoMetadataPanel;
use crate::detail::player::VideoPlayer;
use crate::detail::resolve::{
    remember_similar_selection, resolve_video, ResolvedVideo, SimilarListing,
};
use crate::layout::{ErrorBanner, Notice, SiteFooter, SiteHeader, Spinner};
use crate::models::{Clip, SimilarVideo};
use crate::router::{Route, SearchParams};
use crate::utils::{format_score, scroll_to_top};

#[derive(Properties, PartialEq)]
pub struct DetailPageProps {
    pub id: String,
}

#[function_component(DetailPage)]
pub fn detail_page(props: &DetailPageProps) -> Html {
    let cache = use_cache();
    let navigator = use_navigator();

    let resolved = use_state(|| None::<ResolvedVideo>);
    let selected_clip = use_state(|| None::<Clip>);
    let clip_bounded = use_state(|| false);
    let similar = use_state(SimilarListing::default);
    let similar_loading = use_state(|| false);
    let similar_error = use_state(|| None::<ApiError>);
    // Late similar-video responses for another id are dropped.
    let current_id = use_mut_ref(String::new);
    *current_id.borrow_mut() = props.id.clone();

    {
        let cache = cache.clone();
        let resolved = resolved.clone();
        let selected_clip = selected_clip.clone();
        let similar = similar.clone();
        let similar_loading = similar_loading.clone();
        let similar_error = similar_error.clone();
        use_effect_with(props.id.clone(), move |id| {
            let video = resolve_video(&cache, id);
            selected_clip.set(video.default_clip());
            similar.set(SimilarListing::new(id, video.similar.clone()));
            similar_loading.set(false);
            similar_error.set(None);
            resolved.set(Some(video));
            scroll_to_top();
        });
    }

    let navigate_to = {
        let navigator = navigator.clone();
        move |id: String| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Detail { id });
            }
        }
    };

    let on_find_similar = {
        let cache = cache.clone();
        let video_id = props.id.clone();
        let similar = similar.clone();
        let similar_loading = similar_loading.clone();
        let similar_error = similar_error.clone();
        let current_id = current_id.clone();
        Callback::from(move |_: MouseEvent| {
            if *similar_loading {
                return;
            }
            let cache = cache.clone();
            let video_id = video_id.clone();
            let similar = similar.clone();
            let similar_loading = similar_loading.clone();
            let similar_error = similar_error.clone();
            let current_id = current_id.clone();
            similar_loading.set(true);
            similar_error.set(None);
            spawn_local(async move {
                let result = load_similar_videos(&cache, &video_id).await;
                if *current_id.borrow() != video_id {
                    log::debug!("Dropping similar videos for {video_id}, page moved on");
                    return;
                }
                match result {
                    Ok(videos) => similar.set(SimilarListing::new(&video_id, videos)),
                    Err(e) => {
                        log::error!("Error fetching similar videos: {e}");
                        similar_error.set(Some(e));
                    }
                }
                similar_loading.set(false);
            });
        })
    };

    let on_open_similar = {
        let cache = cache.clone();
        let video_id = props.id.clone();
        let similar = similar.clone();
        let navigate_to = navigate_to.clone();
        Callback::from(move |selected: SimilarVideo| {
            remember_similar_selection(&cache, &video_id, &similar, &selected);
            navigate_to(selected.video_id);
        })
    };

    let on_select_clip = {
        let selected_clip = selected_clip.clone();
        Callback::from(move |clip: Clip| selected_clip.set(Some(clip)))
    };

    let on_toggle_bounded = {
        let clip_bounded = clip_bounded.clone();
        Callback::from(move |_: MouseEvent| clip_bounded.set(!*clip_bounded))
    };

    let Some(video) = (*resolved).clone().filter(|r| r.video.video_id == props.id) else {
        return html! {
            <div class="min-h-screen flex flex-col bg-white">
                <SiteHeader />
                <main class="flex-grow">
                    <Spinner label={"Loading video details...".to_string()} />
                </main>
            </div>
        };
    };

    let previous = video.previous_id().map(|id| {
        let navigate_to = navigate_to.clone();
        let id = id.to_string();
        Callback::from(move |_: MouseEvent| navigate_to(id.clone()))
    });
    let next = video.next_id().map(|id| {
        let navigate_to = navigate_to.clone();
        let id = id.to_string();
        Callback::from(move |_: MouseEvent| navigate_to(id.clone()))
    });

    let back_params = video
        .last_query
        .as_deref()
        .map(SearchParams::cached)
        .unwrap_or_default();

    let nav_button = |label: &str, callback: Option<Callback<MouseEvent>>| {
        let enabled = callback.is_some();
        html! {
            <button
                onclick={callback}
                disabled={!enabled}
                class={classes!(
                    "flex", "items-center", "px-4", "py-2", "rounded-md", "bg-gray-100",
                    if enabled { "hover:bg-gray-200 text-gray-700" } else { "text-gray-400 cursor-not-allowed" }
                )}
            >
                { label }
            </button>
        }
    };

    html! {
        <div class="min-h-screen flex flex-col bg-white">
            <SiteHeader />
            <main class="flex-grow container mx-auto px-4 py-8">
                <div class="mb-4">
                    <Link<Route, SearchParams> to={Route::Search} query={Some(back_params)}
                        classes="inline-flex items-center text-gray-700 hover:text-brand-teal-600 transition-colors">
                        {"← Back to Search"}
                    </Link<Route, SearchParams>>
                </div>

                if let Some(notice) = &video.notice {
                    <Notice message={notice.clone()} />
                }

                <div class="mb-6">
                    <h1 class="text-3xl font-bold mb-2">{ &video.video.filename }</h1>
                    <div class="flex items-center gap-2">
                        <span class="inline-flex items-center justify-center px-2 py-1 rounded-full bg-brand-teal-500 text-white text-xs font-medium">{"RF"}</span>
                        <span class="inline-flex items-center justify-center px-2 py-1 rounded-full bg-brand-green-500 text-white text-xs font-medium">{"$"}</span>
                        <span class="text-gray-600">{ format!("Score: {}", format_score(video.video.display_score())) }</span>
                    </div>
                    if let Some(position) = video.position_label() {
                        <div class="flex items-center mt-2">
                            <span class="text-sm text-gray-500">{ position }</span>
                        </div>
                    }
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                    <div class="lg:col-span-2 space-y-8">
                        <VideoPlayer
                            video={video.video.clone()}
                            selected_clip={(*selected_clip).clone()}
                            clip_bounded={*clip_bounded}
                            on_select_clip={on_select_clip.clone()}
                            on_previous={previous.clone()}
                            on_next={next.clone()}
                        />

                        <div class="flex flex-wrap items-center justify-between gap-3">
                            { nav_button("← Previous Video", previous) }
                            <button
                                onclick={on_find_similar.clone()}
                                disabled={*similar_loading}
                                class={classes!(
                                    "flex", "items-center", "px-4", "py-2", "rounded-md", "bg-brand-teal-500",
                                    "hover:bg-brand-teal-600", "text-white", "transition-colors",
                                    (*similar_loading).then_some("opacity-70 cursor-wait")
                                )}
                            >
                                { if *similar_loading { "Loading..." } else { "Recommend Similar" } }
                            </button>
                            <label class="flex items-center gap-2 text-sm text-gray-700 cursor-pointer">
                                <input type="checkbox" checked={*clip_bounded} onclick={on_toggle_bounded} />
                                {"Stop at clip end"}
                            </label>
                            { nav_button("Next Video →", next) }
                        </div>

                        <SimilarGrid videos={similar.for_video(&props.id).to_vec()} on_open={on_open_similar} />

                        if let Some(e) = &*similar_error {
                            <div>
                                <ErrorBanner
                                    message={format!("Error loading similar videos: {}", e.message())}
                                    details={e.details()}
                                    on_retry={on_find_similar}
                                />
                            </div>
                        }

                        if *similar_loading && similar.for_video(&props.id).is_empty() && similar_error.is_none() {
                            <Spinner label={"Loading similar videos...".to_string()} />
                        }
                    </div>

                    <div class="space-y-6">
                        <ClipList
                            clips={video.video.clips.clone()}
                            selected={(*selected_clip).clone()}
                            on_select={on_select_clip}
                        />
                        <VideoMetadataPanel video_id={props.id.clone()} />
                    </div>
                </div>
            </main>
            <SiteFooter />
        </div>
    }
}
