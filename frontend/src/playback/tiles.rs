use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlMediaElement, HtmlVideoElement};
use yew::prelude::*;

use super::{apply_preview_commands, media_error_message, PreviewCommand, PreviewController};
use crate::config::PREVIEW_DEBOUNCE_MS;
use crate::utils::sleep;

/// Hover previews for one grid of tiles, bound to the owning component.
#[derive(Clone)]
pub struct PreviewTiles {
    controller: Rc<RefCell<PreviewController>>,
    nodes: Rc<RefCell<HashMap<String, NodeRef>>>,
    refresh: UseForceUpdateHandle,
}

#[hook]
pub fn use_preview_tiles() -> PreviewTiles {
    let controller = use_mut_ref(PreviewController::new);
    let nodes = use_mut_ref(HashMap::new);
    let refresh = use_force_update();
    PreviewTiles {
        controller,
        nodes,
        refresh,
    }
}

impl PreviewTiles {
    pub fn node_ref(&self, tile: &str) -> NodeRef {
        self.nodes
            .borrow_mut()
            .entry(tile.to_string())
            .or_default()
            .clone()
    }

    pub fn is_active(&self, tile: &str) -> bool {
        self.controller.borrow().is_active(tile)
    }

    pub fn error(&self, tile: &str) -> Option<String> {
        self.controller.borrow().error(tile).map(str::to_string)
    }

    pub fn enter(&self, tile: &str, url: &str) {
        let (token, commands) = self.controller.borrow_mut().hover_enter(tile);
        self.apply(commands);
        self.refresh.force_update();

        let this = self.clone();
        let url = url.to_string();
        spawn_local(async move {
            sleep(PREVIEW_DEBOUNCE_MS).await;
            let assigned = this.source_assigned(token.tile(), &url);
            let resumed = this.controller.borrow_mut().resume(&token, &url, assigned);
            if let Some(commands) = resumed {
                this.apply(commands);
            }
            this.refresh.force_update();
        });
    }

    pub fn leave(&self, tile: &str) {
        let commands = self.controller.borrow_mut().hover_leave(tile);
        self.apply(commands);
        self.refresh.force_update();
    }

    pub fn dismiss_error(&self, tile: &str) {
        self.controller.borrow_mut().dismiss_error(tile);
        self.refresh.force_update();
    }

    pub fn reset(&self) {
        let commands = self.controller.borrow_mut().reset();
        self.apply(commands);
    }

    pub fn on_enter(&self, tile: &str, url: &str) -> Callback<MouseEvent> {
        let this = self.clone();
        let tile = tile.to_string();
        let url = url.to_string();
        Callback::from(move |_| this.enter(&tile, &url))
    }

    pub fn on_leave(&self, tile: &str) -> Callback<MouseEvent> {
        let this = self.clone();
        let tile = tile.to_string();
        Callback::from(move |_| this.leave(&tile))
    }

    pub fn on_media_error(&self, tile: &str) -> Callback<Event> {
        let this = self.clone();
        let tile = tile.to_string();
        Callback::from(move |e: Event| {
            let message = e
                .target_dyn_into::<HtmlMediaElement>()
                .map(|media| media_error_message(&media))
                .unwrap_or_else(|| "Error loading video".to_string());
            this.controller.borrow_mut().media_error(&tile, &message);
            this.refresh.force_update();
        })
    }

    pub fn on_ended(&self, tile: &str) -> Callback<Event> {
        let this = self.clone();
        let tile = tile.to_string();
        Callback::from(move |_| {
            this.controller.borrow_mut().ended(&tile);
            this.refresh.force_update();
        })
    }

    pub fn on_dismiss(&self, tile: &str) -> Callback<MouseEvent> {
        let this = self.clone();
        let tile = tile.to_string();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            this.dismiss_error(&tile);
        })
    }

    fn source_assigned(&self, tile: &str, url: &str) -> bool {
        self.nodes
            .borrow()
            .get(tile)
            .and_then(|node| node.cast::<HtmlVideoElement>())
            .is_some_and(|video| video.src() == url)
    }

    fn apply(&self, commands: Vec<PreviewCommand>) {
        if commands.is_empty() {
            return;
        }
        let controller = self.controller.clone();
        let refresh = self.refresh.clone();
        let on_play = Callback::from(move |(tile, result): (String, Result<(), String>)| {
            if let Err(message) = result {
                controller.borrow_mut().play_rejected(&tile, &message);
                refresh.force_update();
            }
        });
        apply_preview_commands(&self.nodes.borrow(), commands, on_play);
    }
}
