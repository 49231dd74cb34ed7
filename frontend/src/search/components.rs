use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::VideoResult;
use crate::playback::{use_preview_tiles, PreviewTiles};
use crate::router::{navigate_to_search, Route, SearchParams};
use crate::utils::{format_confidence, format_score, full_video_url};

const RELATED_SEARCHES: &[&str] = &[
    "blacktip reef shark",
    "caracal",
    "cardinalfish",
    "pine grosbeak",
    "narrowstripe cardinalfish",
    "caribbean hermit crab",
];

#[function_component(SearchBar)]
pub fn search_bar() -> Html {
    let current_input = use_state(String::new);
    let navigator = use_navigator();

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let current_input = current_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match &navigator {
                Some(navigator) => navigate_to_search(navigator, &current_input),
                None => log::warn!("Search submitted outside of a router"),
            }
        })
    };

    html! {
        <form onsubmit={on_submit} class="relative w-full max-w-3xl">
            <div class="relative">
                <input
                    type="text"
                    class="w-full pl-4 pr-12 py-2 rounded-lg focus:outline-none focus:ring-2 focus:ring-brand-teal-500 bg-white border border-gray-200"
                    placeholder="Search high-quality video assets"
                    value={(*current_input).clone()}
                    oninput={on_input}
                />
                <button
                    type="submit"
                    class="absolute inset-y-0 right-0 px-3 flex items-center"
                    aria-label="Search"
                >
                    <div class="h-8 w-8 flex items-center justify-center rounded-full bg-brand-teal-500 text-white hover:bg-brand-teal-600 transition-colors">
                        {"🔍"}
                    </div>
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultsGridProps {
    pub results: Vec<VideoResult>,
}

#[function_component(ResultsGrid)]
pub fn results_grid(props: &ResultsGridProps) -> Html {
    let tiles = use_preview_tiles();

    if props.results.is_empty() {
        return html! {
            <div class="text-center py-10">
                <p class="text-gray-500">{"No videos found. Try a different search term."}</p>
            </div>
        };
    }

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            { for props.results.iter().enumerate().map(|(index, video)| result_tile(&tiles, index, video)) }
        </div>
    }
}

fn result_tile(tiles: &PreviewTiles, index: usize, video: &VideoResult) -> Html {
    let tile = format!("result-{index}-{}", video.video_id);
    let url = full_video_url(&video.video_url);
    let active = tiles.is_active(&tile);
    let error = tiles.error(&tile);
    let best_clip = video.best_clip();
    let clip_count = video.clips.len();

    let thumbnail = if video.thumbnail_url.is_empty() {
        "/placeholder.svg".to_string()
    } else {
        video.thumbnail_url.clone()
    };

    html! {
        <div key={tile.clone()}
            class={classes!(
                "relative", "overflow-hidden", "rounded-lg", "border", "border-gray-200",
                "hover:shadow-lg", "transition-all", "duration-300",
                active.then_some("ring-2 ring-brand-teal-500")
            )}
            onmouseenter={tiles.on_enter(&tile, &url)}
            onmouseleave={tiles.on_leave(&tile)}
        >
            <Link<Route> to={Route::Detail { id: video.video_id.clone() }}
                classes="relative block aspect-video cursor-pointer">
                <img src={thumbnail} alt={format!("Nature footage {}", video.display_name())}
                    class="absolute inset-0 w-full h-full object-cover" />
                <video
                    ref={tiles.node_ref(&tile)}
                    class={classes!(
                        "absolute", "inset-0", "w-full", "h-full", "object-cover",
                        (!active).then_some("opacity-0")
                    )}
                    muted={true}
                    playsinline={true}
                    preload="none"
                    onended={tiles.on_ended(&tile)}
                    onerror={tiles.on_media_error(&tile)}
                />
                <div class="absolute inset-0 bg-gradient-to-t from-black/70 via-transparent to-black/30"></div>

                <div class="absolute top-2 right-2 flex flex-col gap-1">
                    <span class="text-xs px-2 py-0.5 rounded-md bg-green-600 text-white font-medium">
                        { format!("Confidence: {}", format_confidence(best_clip.map(|c| c.confidence.as_str()))) }
                    </span>
                    <span class="text-xs px-2 py-0.5 rounded-md bg-purple-600 text-white font-medium">
                        { format!("Score: {}", format_score(video.display_score())) }
                    </span>
                </div>

                if clip_count > 0 {
                    <div class="absolute top-2 left-2">
                        <span class="text-xs px-2 py-0.5 rounded-md bg-black/50 text-white font-medium">
                            { format!("{clip_count} clip{}", if clip_count == 1 { "" } else { "s" }) }
                        </span>
                    </div>
                }

                <div class="absolute bottom-0 left-0 right-0 p-2">
                    <div class="flex justify-between items-center">
                        <span class="text-sm font-medium text-white drop-shadow-md">{ video.display_name() }</span>
                        <div class="flex gap-1">
                            <span class="text-xs px-2 py-0.5 rounded-full bg-brand-teal-500 text-white font-medium">{"RF"}</span>
                            <span class="text-xs px-2 py-0.5 rounded-full bg-brand-green-500 text-white font-medium">{"$"}</span>
                        </div>
                    </div>
                </div>
            </Link<Route>>

            if let Some(message) = error {
                <div class="absolute inset-0 flex items-center justify-center bg-black/70 z-20">
                    <div class="text-center p-4">
                        <p class="text-white text-sm">{ message }</p>
                        <button onclick={tiles.on_dismiss(&tile)}
                            class="mt-3 px-3 py-1 bg-white/20 hover:bg-white/30 rounded text-white text-xs">
                            {"Dismiss"}
                        </button>
                    </div>
                </div>
            }
        </div>
    }
}

#[function_component(RelatedSearches)]
pub fn related_searches() -> Html {
    html! {
        <div class="mb-8">
            <h2 class="text-sm font-semibold uppercase text-gray-500 mb-3">{"RELATED SEARCHES:"}</h2>
            <div class="flex flex-wrap gap-2">
                { for RELATED_SEARCHES.iter().map(|search| html! {
                    <Link<Route, SearchParams>
                        to={Route::Search}
                        query={Some(SearchParams::cached(search))}
                        classes="px-3 py-1 bg-gray-100 text-gray-700 rounded-md text-sm hover:bg-gray-200 transition-colors">
                        { *search }
                    </Link<Route, SearchParams>>
                })}
            </div>
        </div>
    }
}
