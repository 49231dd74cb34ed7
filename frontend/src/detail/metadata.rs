use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::cache::use_cache;
use crate::detail::api::load_video_record;
use crate::layout::ErrorBanner;
use crate::models::{SystemMetadata, UserMetadata, VideoRecord};
use crate::utils::{
    format_file_size, format_iso8601_date, format_media_duration, split_list, split_narrative,
    NarrativePart,
};

#[derive(Properties, PartialEq)]
pub struct VideoMetadataPanelProps {
    pub video_id: String,
}

#[function_component(VideoMetadataPanel)]
pub fn video_metadata_panel(props: &VideoMetadataPanelProps) -> Html {
    let cache = use_cache();
    let record = use_state(|| None::<VideoRecord>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let attempt = use_state(|| 0u32);

    {
        let record = record.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((props.video_id.clone(), *attempt), move |(video_id, _)| {
            let video_id = video_id.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match load_video_record(&cache, &video_id).await {
                    Ok(data) => record.set(Some(data)),
                    Err(e) => {
                        log::error!("Error fetching video data for {video_id}: {e}");
                        record.set(None);
                        error.set(Some(e.message()));
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

    let shell = |content: Html| {
        html! {
            <div class="bg-white rounded-lg border border-gray-200 p-6 mt-6">{ content }</div>
        }
    };

    if *loading {
        return shell(html! {
            <div class="flex flex-col items-center py-6">
                <div class="h-8 w-8 border-4 border-brand-teal-500 border-t-transparent rounded-full animate-spin mb-3"></div>
                <p class="text-brand-teal-600">{"Loading video details..."}</p>
            </div>
        });
    }

    if let Some(message) = &*error {
        return shell(html! {
            <ErrorBanner message={"Error loading details".to_string()} details={message.clone()} {on_retry} />
        });
    }

    let Some(record) = &*record else {
        return shell(html! {
            <p class="text-gray-500 text-center">{"No details available for this video."}</p>
        });
    };

    shell(html! {
        <>
            <h2 class="text-2xl font-bold mb-6 text-gray-800">{"Video Analysis & Details"}</h2>
            { analysis_section(&record.user_metadata) }
            { environment_section(&record.user_metadata) }
            { keywords_section(&record.user_metadata) }
            { narrative_section(&record.user_metadata) }
            { technical_section(&record.system_metadata, &record.created_at) }
        </>
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn analysis_card(title: &str, body: &str, extra: Html) -> Html {
    html! {
        <div class="bg-gray-50 rounded-lg p-4">
            <h4 class="font-semibold text-gray-800 mb-1">{ title }</h4>
            <p class="text-gray-700 text-sm leading-relaxed">{ body }</p>
            { extra }
        </div>
    }
}

fn analysis_section(meta: &UserMetadata) -> Html {
    let shot = present(&meta.analysis_shot).map(|shot| analysis_card("Shot Type", shot, html! {}));
    let action = present(&meta.analysis_action).map(|action| analysis_card("Action", action, html! {}));
    let subject = present(&meta.analysis_subject_speciescategory).map(|subject| {
        let categories = present(&meta.analysis_subject_classification)
            .map(split_list)
            .unwrap_or_default();
        let chips = html! {
            if !categories.is_empty() {
                <div class="flex flex-wrap gap-2 mt-3">
                    { for categories.iter().map(|category| html! {
                        <span class="px-3 py-1 bg-gray-100 text-gray-700 rounded-full text-sm font-medium">{ category }</span>
                    }) }
                </div>
            }
        };
        analysis_card("Subject", subject, chips)
    });

    html! {
        <div class="space-y-4 mb-6">
            { for shot }
            { for action }
            { for subject }
        </div>
    }
}

fn environment_section(meta: &UserMetadata) -> Html {
    let location = present(&meta.analysis_environment_location);
    let position = present(&meta.analysis_environment_position);
    if location.is_none() && position.is_none() {
        return html! {};
    }

    html! {
        <div class="mb-6">
            <h3 class="font-semibold text-xl text-gray-800 mb-4">{"Environment"}</h3>
            <div class="flex flex-wrap gap-3">
                if let Some(location) = location {
                    <div class="px-4 py-2 bg-emerald-50 rounded-lg">
                        <span class="text-emerald-800 font-medium">{ location }</span>
                    </div>
                }
                if let Some(position) = position {
                    <div class="px-4 py-2 bg-amber-50 rounded-lg">
                        <span class="text-amber-800 font-medium">{ position }</span>
                    </div>
                }
            </div>
        </div>
    }
}

fn keywords_section(meta: &UserMetadata) -> Html {
    let Some(keywords) = present(&meta.analysis_keywords) else {
        return html! {};
    };

    html! {
        <div class="mb-6">
            <h3 class="font-semibold text-xl text-gray-800 mb-4">{"Keywords & Tags"}</h3>
            <div class="flex flex-wrap gap-2">
                { for split_list(keywords).into_iter().map(|keyword| html! {
                    <span class="px-3 py-1 bg-brand-teal-50 text-brand-teal-700 rounded-full text-sm border border-brand-teal-200">
                        { keyword }
                    </span>
                }) }
            </div>
        </div>
    }
}

fn narrative_section(meta: &UserMetadata) -> Html {
    let Some(narrative) = present(&meta.analysis_narrativeflow) else {
        return html! {};
    };

    html! {
        <div class="mb-6">
            <h3 class="font-semibold text-xl text-gray-800 mb-4">{"Narrative Flow"}</h3>
            <div class="bg-gray-50 rounded-lg p-4 leading-relaxed">
                { for split_narrative(narrative).into_iter().map(|part| match part {
                    NarrativePart::Timestamp(time) => html! {
                        <span class="inline-block px-2 py-0.5 mx-1 bg-brand-teal-100 text-brand-teal-800 rounded font-mono text-sm font-semibold">
                            { time }
                        </span>
                    },
                    NarrativePart::Text(text) => html! {
                        <span class="text-gray-700">{ text }</span>
                    },
                }) }
            </div>
        </div>
    }
}

fn technical_section(meta: &SystemMetadata, created_at: &str) -> Html {
    let field = |label: &str, value: String| {
        html! {
            <div class="bg-gray-50 rounded-lg p-3">
                <p class="text-xs text-gray-500 uppercase tracking-wide">{ label }</p>
                <p class="font-semibold text-gray-800">{ value }</p>
            </div>
        }
    };

    html! {
        <div>
            <h3 class="font-semibold text-xl text-gray-800 mb-4">{"Technical Information"}</h3>
            <div class="grid grid-cols-2 gap-3 mb-3">
                { field("Duration", format_media_duration(meta.duration)) }
                { field("Resolution", format!("{}×{}", meta.width, meta.height)) }
            </div>
            <div class="grid grid-cols-2 gap-3 mb-3">
                { field("Frame Rate", format!("{} fps", meta.fps)) }
                { field("File Size", format_file_size(meta.size)) }
            </div>
            if !created_at.is_empty() {
                <div class="mb-3">{ field("Indexed", format_iso8601_date(created_at)) }</div>
            }
            <div class="bg-gray-50 rounded-lg p-3">
                <p class="text-xs text-gray-500 uppercase tracking-wide">{"Filename"}</p>
                <p class="font-mono text-sm text-gray-800 break-all">{ &meta.filename }</p>
            </div>
        </div>
    }
}
