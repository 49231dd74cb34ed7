use web_sys::HtmlVideoElement;
use yew::prelude::*;

use crate::config::REEL_VIDEO_URLS;
use crate::playback::{apply_player_commands, PlayerCommand};

/// Short label for a reel clip: its file stem, or `Video_<n>`.
pub fn reel_code(url: &str, index: usize) -> String {
    url.rsplit('/')
        .next()
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Video_{}", index + 1))
}

#[derive(Properties, PartialEq)]
struct ReelCardProps {
    src: AttrValue,
    code: String,
    #[prop_or_default]
    tall: bool,
}

#[function_component(ReelCard)]
fn reel_card(props: &ReelCardProps) -> Html {
    let video_ref = use_node_ref();
    let loaded = use_state(|| false);

    {
        let video_ref = video_ref.clone();
        use_effect_with(props.src.clone(), move |src| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let src = src.to_string();
                let on_play = Callback::from(move |result: Result<(), String>| {
                    if let Err(e) = result {
                        log::warn!("Autoplay prevented for {src}: {e}");
                    }
                });
                video.load();
                apply_player_commands(&video, vec![PlayerCommand::Play], on_play);
            }
        });
    }

    let on_ready = {
        let loaded = loaded.clone();
        let src = props.src.clone();
        Callback::from(move |_: Event| {
            if !*loaded {
                log::debug!("Video loaded: {src}");
                loaded.set(true);
            }
        })
    };

    let on_error = {
        let src = props.src.clone();
        Callback::from(move |_: Event| log::error!("Error loading video: {src}"))
    };

    html! {
        <div class={classes!(
            "relative", "overflow-hidden", "rounded-xl", "shadow-lg", "group",
            if props.tall { "aspect-[3/4]" } else { "aspect-video" }
        )}>
            if !*loaded {
                <div class="absolute inset-0 flex items-center justify-center bg-gray-100">
                    <div class="h-8 w-8 border-4 border-brand-teal-500 border-t-transparent rounded-full animate-spin"></div>
                </div>
            }
            <video
                ref={video_ref}
                src={props.src.clone()}
                autoplay={true}
                loop={true}
                muted={true}
                playsinline={true}
                class={classes!(
                    "absolute", "inset-0", "w-full", "h-full", "object-cover", "transition-transform",
                    "duration-500", "group-hover:scale-110", "z-10",
                    if *loaded { "opacity-100" } else { "opacity-0" }
                )}
                oncanplay={on_ready.clone()}
                onloadeddata={on_ready}
                onerror={on_error}
            />
            <div class="absolute inset-0 bg-gradient-to-t from-black/60 via-transparent to-transparent z-20"></div>
            <div class="absolute bottom-0 left-0 right-0 p-3 flex justify-between items-center z-30">
                <span class="text-xs font-medium text-white drop-shadow-md">{ &props.code }</span>
                <div class="flex gap-1">
                    <span class="text-xs px-2 py-0.5 rounded-full font-medium bg-brand-teal-500 text-white">{"RF"}</span>
                    <span class="text-xs px-2 py-0.5 rounded-full font-medium bg-brand-green-500 text-white">{"4K"}</span>
                </div>
            </div>
        </div>
    }
}

/// Autoplaying, muted grid of demo footage on the landing page.
#[function_component(PreviewReel)]
pub fn preview_reel() -> Html {
    html! {
        <div class="grid grid-cols-2 gap-3">
            { for REEL_VIDEO_URLS.iter().enumerate().map(|(index, url)| html! {
                <ReelCard
                    key={*url}
                    src={AttrValue::Static(*url)}
                    code={reel_code(url, index)}
                    tall={index % 3 == 0}
                />
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_the_file_stem() {
        assert_eq!(
            reel_code("https://cdn.example.com/demo/CBE200624_0124.mp4", 0),
            "CBE200624_0124"
        );
        assert_eq!(reel_code("", 2), "Video_3");
        assert_eq!(reel_code("https://cdn.example.com/demo/", 0), "Video_1");
    }
}
