use yew::prelude::*;

use crate::models::{Clip, SimilarVideo};
use crate::playback::{use_preview_tiles, PreviewTiles};
use crate::utils::{format_clip_duration, format_confidence, format_score};

#[derive(Properties, PartialEq)]
pub struct ClipListProps {
    pub clips: Vec<Clip>,
    #[prop_or_default]
    pub selected: Option<Clip>,
    pub on_select: Callback<Clip>,
}

#[function_component(ClipList)]
pub fn clip_list(props: &ClipListProps) -> Html {
    html! {
        <div class="bg-white rounded-lg border border-gray-200 p-4">
            <h2 class="text-xl font-semibold mb-4">{"Clips"}</h2>
            if props.clips.is_empty() {
                <p class="text-gray-500">{"No clips available for this video."}</p>
            } else {
                <div class="space-y-3">
                    { for props.clips.iter().map(|clip| {
                        let selected = props.selected.as_ref() == Some(clip);
                        let onclick = {
                            let on_select = props.on_select.clone();
                            let clip = clip.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(clip.clone()))
                        };
                        let thumbnail = if clip.thumbnail_url.is_empty() {
                            "/placeholder.svg?height=64&width=96&query=nature".to_string()
                        } else {
                            clip.thumbnail_url.clone()
                        };
                        html! {
                            <div
                                class={classes!(
                                    "flex", "gap-3", "p-2", "rounded-md", "cursor-pointer", "transition-colors",
                                    if selected { "bg-brand-teal-50 border border-brand-teal-200" } else { "hover:bg-gray-50" }
                                )}
                                {onclick}
                            >
                                <div class="relative w-24 h-16 flex-shrink-0 rounded overflow-hidden">
                                    <img src={thumbnail} alt="Clip thumbnail" class="w-full h-full object-cover" />
                                </div>
                                <div class="flex-1 text-sm">
                                    <div class="flex justify-between">
                                        <span class="font-medium">{"Clip Duration"}</span>
                                        <span>{ format_clip_duration(clip.start, clip.end) }</span>
                                    </div>
                                    <div class="flex justify-between">
                                        <span class="font-medium">{"Confidence"}</span>
                                        <span>{ format_confidence(Some(&clip.confidence)) }</span>
                                    </div>
                                    <div class="flex justify-between">
                                        <span class="font-medium">{"Score"}</span>
                                        <span>{ format_score(clip.score) }</span>
                                    </div>
                                </div>
                            </div>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SimilarGridProps {
    pub videos: Vec<SimilarVideo>,
    pub on_open: Callback<SimilarVideo>,
}

#[function_component(SimilarGrid)]
pub fn similar_grid(props: &SimilarGridProps) -> Html {
    let tiles = use_preview_tiles();

    {
        // A new list means new tiles; drop whatever the old ones were doing.
        let tiles = tiles.clone();
        let ids: Vec<String> = props.videos.iter().map(|v| v.video_id.clone()).collect();
        use_effect_with(ids, move |_| tiles.reset());
    }

    if props.videos.is_empty() {
        return html! {};
    }

    let source = props.videos.first().and_then(|v| v.source.clone());

    html! {
        <div class="mt-8">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-bold">{"Similar Videos"}</h2>
                if let Some(source) = source {
                    <span class="text-xs text-gray-500">{ format!("Source: {source}") }</span>
                }
            </div>
            <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4">
                { for props.videos.iter().map(|video| similar_tile(&tiles, video, &props.on_open)) }
            </div>
        </div>
    }
}

fn similarity_badge(video: &SimilarVideo) -> String {
    match (video.similarity_percentage, video.similarity_score) {
        (Some(percentage), _) if percentage != 0.0 => format!("{percentage:.1}%"),
        (_, Some(score)) if score != 0.0 => format!("{:.1}%", score * 100.0),
        _ => "Similar".to_string(),
    }
}

fn similar_tile(tiles: &PreviewTiles, video: &SimilarVideo, on_open: &Callback<SimilarVideo>) -> Html {
    let tile = format!("similar-{}", video.video_id);
    let active = tiles.is_active(&tile);
    let error = tiles.error(&tile);

    let open = {
        let on_open = on_open.clone();
        let video = video.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_open.emit(video.clone());
        })
    };

    let thumbnail = video
        .thumbnail_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| "/placeholder.svg".to_string());

    html! {
        <div key={tile.clone()}
            class={classes!(
                "relative", "overflow-hidden", "rounded-lg", "border", "border-gray-200",
                "cursor-pointer", "hover:shadow-lg", "transition-all",
                active.then_some("ring-2 ring-brand-teal-500")
            )}
            onclick={open.clone()}
            onmouseenter={tiles.on_enter(&tile, &video.video_url)}
            onmouseleave={tiles.on_leave(&tile)}
        >
            <div class="relative aspect-video">
                <img src={thumbnail} alt={video.display_name()} class="absolute inset-0 w-full h-full object-cover" />
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

                <div class="absolute top-2 right-2">
                    <span class="text-xs px-2 py-0.5 rounded-md bg-brand-teal-600 text-white font-medium">
                        { similarity_badge(video) }
                    </span>
                </div>

                <div class="absolute bottom-0 left-0 right-0 p-2">
                    <div class="flex justify-between items-center">
                        <span class="text-sm font-medium text-white drop-shadow-md">{ video.display_name() }</span>
                        <span class="text-xs px-2 py-0.5 rounded-full bg-brand-teal-500 text-white font-medium">{"RF"}</span>
                    </div>
                </div>

                if active && error.is_none() {
                    <div class="absolute inset-0 flex items-center justify-center bg-black/20 z-30">
                        <button onclick={open}
                            class="p-3 bg-black/40 rounded-full hover:bg-black/60 transition-colors text-white"
                            aria-label="View video details">
                            {"▶"}
                        </button>
                    </div>
                }

                if let Some(message) = error {
                    <div class="absolute inset-0 flex items-center justify-center bg-black/70 z-40">
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
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similar(score: Option<f64>, percentage: Option<f64>) -> SimilarVideo {
        SimilarVideo {
            video_id: "abc".into(),
            filename: None,
            thumbnail_url: None,
            video_url: String::new(),
            similarity_score: score,
            similarity_percentage: percentage,
            embedding_type: None,
            scope: None,
            source: None,
        }
    }

    #[test]
    fn badge_prefers_percentage() {
        assert_eq!(similarity_badge(&similar(Some(0.5), Some(87.4))), "87.4%");
        assert_eq!(similarity_badge(&similar(Some(0.912), None)), "91.2%");
        assert_eq!(similarity_badge(&similar(None, None)), "Similar");
    }
}
