mod api;
mod cache;
mod config;
mod detail;
mod env_variable_utils;
mod home;
mod layout;
mod logger;
mod models;
mod playback;
mod router;
mod search;
mod utils;

use crate::cache::AppCache;
use crate::env_variable_utils::{get_app_name, is_debug_mode, BACKEND_URL};
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let cache = use_state(AppCache::browser);

    html! {
        <ContextProvider<AppCache> context={(*cache).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppCache>>
    }
}

fn main() {
    logger::init_logger(is_debug_mode());

    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
        get_app_name(),
        *BACKEND_URL,
        is_debug_mode()
    );
}
