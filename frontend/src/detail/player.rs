use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlMediaElement, HtmlVideoElement};
use yew::prelude::*;

use crate::config::{CLIP_HIGHLIGHT_MS, CONTROLS_HIDE_MS, SKIP_SECONDS};
use crate::models::{Clip, VideoResult};
use crate::playback::{apply_player_commands, media_error_message, PlayerCommand, PlayerMachine};
use crate::utils::{format_timestamp, full_video_url, sleep};

/// Glue between the player state machine and the mounted `<video>`.
#[derive(Clone)]
struct PlayerHandle {
    machine: Rc<RefCell<PlayerMachine>>,
    node: NodeRef,
    refresh: UseForceUpdateHandle,
}

impl PlayerHandle {
    fn run<F>(&self, step: F)
    where
        F: FnOnce(&mut PlayerMachine) -> Vec<PlayerCommand>,
    {
        let commands = step(&mut self.machine.borrow_mut());
        if !commands.is_empty() {
            if let Some(video) = self.node.cast::<HtmlVideoElement>() {
                apply_player_commands(&video, commands, self.play_outcome());
            }
        }
        self.refresh.force_update();
    }

    fn update<F>(&self, step: F)
    where
        F: FnOnce(&mut PlayerMachine),
    {
        step(&mut self.machine.borrow_mut());
        self.refresh.force_update();
    }

    fn play_outcome(&self) -> Callback<Result<(), String>> {
        let this = self.clone();
        Callback::from(move |result: Result<(), String>| match result {
            Ok(()) => this.update(PlayerMachine::play_started),
            Err(message) => this.update(|m| m.play_rejected(&message)),
        })
    }

    fn is_playing(&self) -> bool {
        self.machine.borrow().is_playing()
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    pub video: VideoResult,
    #[prop_or_default]
    pub selected_clip: Option<Clip>,
    #[prop_or_default]
    pub clip_bounded: bool,
    pub on_select_clip: Callback<Clip>,
    #[prop_or_default]
    pub on_previous: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub on_next: Option<Callback<MouseEvent>>,
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let machine = use_mut_ref(PlayerMachine::new);
    let video_ref = use_node_ref();
    let container_ref = use_node_ref();
    let progress_ref = use_node_ref();
    let refresh = use_force_update();
    let show_controls = use_state(|| true);
    let hide_generation = use_mut_ref(|| 0u32);
    let highlighted = use_state(|| false);

    let player = PlayerHandle {
        machine: machine.clone(),
        node: video_ref.clone(),
        refresh,
    };

    {
        let player = player.clone();
        let source = full_video_url(&props.video.video_url);
        use_effect_with(
            (props.video.video_id.clone(), source),
            move |(video_id, source)| {
                player.run(|m| m.open(video_id, source));
            },
        );
    }

    {
        let player = player.clone();
        let highlighted = highlighted.clone();
        use_effect_with(
            (props.video.video_id.clone(), props.selected_clip.clone()),
            move |(_, clip)| {
                if let Some(clip) = clip.clone() {
                    let was_loaded = player.machine.borrow().is_loaded();
                    player.run(|m| m.select_clip(clip));
                    if was_loaded {
                        highlighted.set(true);
                        spawn_local(async move {
                            sleep(CLIP_HIGHLIGHT_MS).await;
                            highlighted.set(false);
                        });
                    }
                }
            },
        );
    }

    {
        let player = player.clone();
        use_effect_with(props.clip_bounded, move |bounded| {
            player.update(|m| m.set_clip_bounded(*bounded));
        });
    }

    let reveal_controls = {
        let show_controls = show_controls.clone();
        let hide_generation = hide_generation.clone();
        let player = player.clone();
        Callback::from(move |_: MouseEvent| {
            show_controls.set(true);
            let generation = {
                let mut current = hide_generation.borrow_mut();
                *current = current.wrapping_add(1);
                *current
            };
            let show_controls = show_controls.clone();
            let hide_generation = hide_generation.clone();
            let player = player.clone();
            spawn_local(async move {
                sleep(CONTROLS_HIDE_MS).await;
                if *hide_generation.borrow() == generation && player.is_playing() {
                    show_controls.set(false);
                }
            });
        })
    };

    let on_container_leave = {
        let show_controls = show_controls.clone();
        let player = player.clone();
        Callback::from(move |_: MouseEvent| {
            if player.is_playing() {
                show_controls.set(false);
            }
        })
    };

    let on_toggle_play = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.run(PlayerMachine::toggle_play))
    };

    let on_loaded_metadata = {
        let player = player.clone();
        Callback::from(move |e: Event| {
            let duration = e
                .target_dyn_into::<HtmlMediaElement>()
                .map(|media| media.duration())
                .unwrap_or(0.0);
            log::debug!("Video metadata loaded, duration {duration}");
            player.run(|m| m.metadata_loaded(duration));
        })
    };

    let on_time_update = {
        let player = player.clone();
        Callback::from(move |e: Event| {
            if let Some(media) = e.target_dyn_into::<HtmlMediaElement>() {
                let time = media.current_time();
                player.run(|m| m.time_update(time));
            }
        })
    };

    let on_play = {
        let player = player.clone();
        Callback::from(move |_: Event| player.update(PlayerMachine::play_started))
    };

    let on_pause = {
        let player = player.clone();
        Callback::from(move |_: Event| player.update(PlayerMachine::paused))
    };

    let on_ended = {
        let player = player.clone();
        Callback::from(move |_: Event| player.update(PlayerMachine::ended))
    };

    let on_media_error = {
        let player = player.clone();
        Callback::from(move |e: Event| {
            let message = e
                .target_dyn_into::<HtmlMediaElement>()
                .map(|media| media_error_message(&media))
                .unwrap_or_else(|| "Unknown error".to_string());
            player.update(|m| m.media_error(&message));
        })
    };

    let on_volume_change = {
        let player = player.clone();
        Callback::from(move |e: Event| {
            if let Some(media) = e.target_dyn_into::<HtmlMediaElement>() {
                let (volume, muted) = (media.volume(), media.muted());
                player.update(|m| m.volume_changed(volume, muted));
            }
        })
    };

    let fraction_at = {
        let progress_ref = progress_ref.clone();
        move |e: &MouseEvent| -> Option<f64> {
            let bar = progress_ref.cast::<HtmlElement>()?;
            let rect = bar.get_bounding_client_rect();
            (rect.width() > 0.0).then(|| (e.client_x() as f64 - rect.left()) / rect.width())
        }
    };

    let on_progress_click = {
        let player = player.clone();
        let fraction_at = fraction_at.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(fraction) = fraction_at(&e) {
                player.run(|m| m.seek_fraction(fraction));
            }
        })
    };

    let on_progress_drag = {
        let player = player.clone();
        Callback::from(move |e: MouseEvent| {
            if !player.machine.borrow().is_scrubbing() {
                return;
            }
            if let Some(fraction) = fraction_at(&e) {
                player.run(|m| m.seek_fraction(fraction));
            }
        })
    };

    let on_scrub_start = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.update(PlayerMachine::begin_scrub))
    };

    let on_scrub_end = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.update(PlayerMachine::end_scrub))
    };

    let on_skip_back = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.run(|m| m.skip(-SKIP_SECONDS)))
    };

    let on_skip_forward = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.run(|m| m.skip(SKIP_SECONDS)))
    };

    let on_toggle_mute = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.run(PlayerMachine::toggle_mute))
    };

    let on_volume_input = {
        let player = player.clone();
        Callback::from(move |e: InputEvent| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            if let Ok(volume) = input.value().parse::<f64>() {
                player.run(|m| m.set_volume(volume));
            }
        })
    };

    let on_dismiss_error = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.update(PlayerMachine::dismiss_error))
    };

    let on_retry = {
        let player = player.clone();
        Callback::from(move |_: MouseEvent| player.run(PlayerMachine::retry))
    };

    let on_fullscreen = {
        let container_ref = container_ref.clone();
        Callback::from(move |_: MouseEvent| toggle_fullscreen(&container_ref))
    };

    let (is_loading, is_loaded, is_playing, is_muted, can_retry) = {
        let state = machine.borrow();
        (
            state.is_loading(),
            state.is_loaded(),
            state.is_playing(),
            state.is_muted(),
            state.can_retry(),
        )
    };
    let (current_time, duration, progress, volume, error) = {
        let state = machine.borrow();
        (
            state.current_time(),
            state.duration(),
            state.progress(),
            state.volume(),
            state.error().map(str::to_string),
        )
    };
    let show_reload = can_retry && error.is_none();
    let percent = |time: f64| {
        if duration > 0.0 {
            (time / duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    };

    let clip_markers = props.video.clips.iter().enumerate().map(|(index, clip)| {
        let selected = props.selected_clip.as_ref() == Some(clip);
        let colour = if selected { "bg-brand-teal-400" } else { "bg-brand-green-400" };
        let select = {
            let on_select_clip = props.on_select_clip.clone();
            let clip = clip.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                on_select_clip.emit(clip.clone());
            })
        };
        html! {
            <>
                <div class={classes!("absolute", "top-0", "h-full", "w-0.5", "opacity-80", "cursor-pointer", "z-10", colour)}
                    style={format!("left: {}%", percent(clip.start))}
                    title={format!("Clip {} Start: {}", index + 1, format_timestamp(clip.start))}
                    onclick={select.clone()} />
                <div class={classes!("absolute", "top-0", "h-full", "w-0.5", "opacity-60", "cursor-pointer", "z-10", colour)}
                    style={format!("left: {}%", percent(clip.end))}
                    title={format!("Clip {} End: {}", index + 1, format_timestamp(clip.end))}
                    onclick={select} />
            </>
        }
    });

    html! {
        <div
            ref={container_ref}
            class={classes!(
                "relative", "aspect-video", "bg-black", "rounded-lg", "overflow-hidden", "group",
                (*highlighted).then_some("ring-4 ring-brand-teal-500 ring-opacity-70")
            )}
            onmousemove={reveal_controls.clone()}
            onmouseenter={reveal_controls}
            onmouseleave={on_container_leave}
        >
            <video
                ref={video_ref}
                class="w-full h-full object-contain"
                playsinline={true}
                preload="metadata"
                onclick={on_toggle_play.clone()}
                onloadedmetadata={on_loaded_metadata}
                ontimeupdate={on_time_update}
                onplay={on_play}
                onpause={on_pause}
                onended={on_ended}
                onerror={on_media_error}
                onvolumechange={on_volume_change}
            />

            if is_loading {
                <div class="absolute inset-0 flex items-center justify-center bg-black/50 z-40">
                    <div class="flex flex-col items-center">
                        <div class="h-10 w-10 border-4 border-white border-t-transparent rounded-full animate-spin mb-2"></div>
                        <p class="text-white text-sm">{"Loading video..."}</p>
                    </div>
                </div>
            }

            if let Some(error) = error {
                <div class="absolute top-4 left-4 right-4 bg-red-500/80 text-white px-4 py-2 rounded-md z-50">
                    <p class="text-sm font-medium">{ error }</p>
                    if can_retry {
                        <button onclick={on_retry.clone()} class="mt-2 px-3 py-1 bg-white/20 hover:bg-white/30 rounded text-xs font-medium">
                            {"Retry"}
                        </button>
                    }
                    <button onclick={on_dismiss_error} class="absolute top-2 right-2 text-white" aria-label="Dismiss error">
                        {"×"}
                    </button>
                </div>
            }

            if show_reload {
                <div class="absolute inset-0 flex items-center justify-center bg-black/60 z-40">
                    <button onclick={on_retry} class="px-4 py-2 bg-white/90 hover:bg-white text-gray-800 rounded-md text-sm font-medium">
                        {"Reload video"}
                    </button>
                </div>
            }

            if let Some(on_previous) = props.on_previous.clone() {
                <button onclick={on_previous}
                    class="absolute left-4 top-1/2 transform -translate-y-1/2 bg-black/50 hover:bg-black/70 text-white p-3 rounded-full transition-colors z-30"
                    aria-label="Previous video">{"‹"}</button>
            }
            if let Some(on_next) = props.on_next.clone() {
                <button onclick={on_next}
                    class="absolute right-4 top-1/2 transform -translate-y-1/2 bg-black/50 hover:bg-black/70 text-white p-3 rounded-full transition-colors z-30"
                    aria-label="Next video">{"›"}</button>
            }

            if is_loaded {
                <div class={classes!(
                    "absolute", "bottom-0", "left-0", "right-0", "bg-gradient-to-t", "from-black/80",
                    "to-transparent", "p-4", "transition-opacity", "duration-300", "z-30",
                    if *show_controls { "opacity-100" } else { "opacity-0" }
                )}>
                    <div
                        ref={progress_ref}
                        class="w-full h-2 bg-white/30 rounded-full mb-4 cursor-pointer relative"
                        onclick={on_progress_click}
                        onmousedown={on_scrub_start}
                        onmouseup={on_scrub_end.clone()}
                        onmouseleave={on_scrub_end}
                        onmousemove={on_progress_drag}
                    >
                        <div class="h-full bg-brand-teal-500 rounded-full relative"
                            style={format!("width: {}%", progress * 100.0)}>
                            <div class="absolute right-0 top-1/2 transform translate-x-1/2 -translate-y-1/2 w-4 h-4 bg-white rounded-full shadow-lg"></div>
                        </div>
                        { for clip_markers }
                    </div>

                    <div class="flex items-center justify-between">
                        <div class="flex items-center gap-4">
                            <button onclick={on_skip_back} class="text-white hover:text-brand-teal-400" aria-label="Back 10 seconds">{"⏪"}</button>
                            <button onclick={on_toggle_play} class="text-white hover:text-brand-teal-400 p-2 bg-white/20 rounded-full"
                                aria-label={if is_playing { "Pause" } else { "Play" }}>
                                { if is_playing { "❚❚" } else { "▶" } }
                            </button>
                            <button onclick={on_skip_forward} class="text-white hover:text-brand-teal-400" aria-label="Forward 10 seconds">{"⏩"}</button>
                            <div class="flex items-center gap-2">
                                <button onclick={on_toggle_mute} class="text-white hover:text-brand-teal-400"
                                    aria-label={if is_muted { "Unmute" } else { "Mute" }}>
                                    { if is_muted { "🔇" } else { "🔊" } }
                                </button>
                                <input type="range" min="0" max="1" step="0.1"
                                    value={if is_muted { "0".to_string() } else { volume.to_string() }}
                                    oninput={on_volume_input}
                                    class="w-20 accent-brand-teal-500" />
                            </div>
                            <span class="text-white text-sm">
                                { format!("{} / {}", format_timestamp(current_time), format_timestamp(duration)) }
                            </span>
                        </div>
                        <div class="flex items-center gap-2">
                            if let Some(clip) = &props.selected_clip {
                                <span class="text-white text-sm bg-brand-teal-500/70 px-2 py-1 rounded flex items-center gap-1">
                                    <span class="w-2 h-2 rounded-full bg-white animate-pulse"></span>
                                    { format!("Clip: {} - {}", format_timestamp(clip.start), format_timestamp(clip.end)) }
                                </span>
                            }
                            <button onclick={on_fullscreen} class="text-white hover:text-brand-teal-400" aria-label="Fullscreen">{"⛶"}</button>
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}

fn toggle_fullscreen(container: &NodeRef) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(element) = container.cast::<HtmlElement>() {
        if let Err(e) = element.request_fullscreen() {
            log::warn!("Fullscreen request failed: {e:?}");
        }
    }
}
