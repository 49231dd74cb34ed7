mod reel;

use wasm_bindgen_futures::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::SEARCH_HIGHLIGHT_MS;
use crate::layout::{SiteFooter, SiteHeader};
use crate::router::{navigate_to_search, Route, SearchParams};
use crate::search::SearchBar;
use crate::utils::{scroll_to_top, sleep};
use reel::PreviewReel;

/// Category shortcuts. Each one runs a search for its label.
const CATEGORIES: &[(&str, &str)] = &[
    ("Nature & Wildlife", "🌿"),
    ("Ocean & Underwater", "🐟"),
    ("People & Adventure", "🧗"),
    ("4k to 8k Ultra HD", "🎥"),
];

struct BrowseCard {
    title: &'static str,
    count: &'static str,
    query: &'static str,
    image: &'static str,
}

const BROWSE_CARDS: &[BrowseCard] = &[
    BrowseCard { title: "Monkey", count: "410 videos", query: "monkey", image: "/monkey.png" },
    BrowseCard { title: "Octopus", count: "340 videos", query: "octopus", image: "/octopus.png" },
    BrowseCard { title: "Hibiscus Flower", count: "142 videos", query: "hibiscus flower", image: "/hibiscus.png" },
];

#[function_component(CategoryButtons)]
fn category_buttons() -> Html {
    let navigator = use_navigator();

    html! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mt-8">
            { for CATEGORIES.iter().map(|(name, icon)| {
                let navigator = navigator.clone();
                let onclick = Callback::from(move |_: MouseEvent| {
                    if let Some(navigator) = &navigator {
                        navigate_to_search(navigator, name);
                    }
                });
                html! {
                    <button key={*name} {onclick}
                        class="flex flex-col items-center justify-center p-4 rounded-lg transition-all duration-300 hover:shadow-md bg-white border border-gray-100 hover:bg-gray-50 group">
                        <div class="mb-2 text-2xl text-gray-700 group-hover:text-black transition-colors">{ *icon }</div>
                        <span class="text-sm text-center font-medium">{ *name }</span>
                    </button>
                }
            }) }
        </div>
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let browse_ref = use_node_ref();
    let highlight_search = use_state(|| false);

    {
        let browse_ref = browse_ref.clone();
        use_effect_with((), move |_| {
            let hash = web_sys::window().and_then(|w| w.location().hash().ok());
            if hash.as_deref() == Some("#browse") {
                scroll_into_view(&browse_ref);
            }
        });
    }

    let on_explore = {
        let highlight_search = highlight_search.clone();
        Callback::from(move |_: MouseEvent| {
            scroll_to_top();
            highlight_search.set(true);
            let highlight_search = highlight_search.clone();
            spawn_local(async move {
                sleep(SEARCH_HIGHLIGHT_MS).await;
                highlight_search.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex flex-col bg-white">
            <SiteHeader />
            <main class="flex-grow">
                <section class="relative overflow-hidden py-16">
                    <div class="container mx-auto px-4 grid grid-cols-1 lg:grid-cols-2 gap-12 items-center">
                        <div>
                            <a href="https://twelvelabs.io" target="_blank" rel="noopener noreferrer"
                                class="inline-block mb-4 text-sm text-brand-teal-600 hover:underline">
                                {"Powered by TwelveLabs"}
                            </a>
                            <h1 class="text-4xl md:text-5xl font-bold mb-4 text-gray-900">
                                {"4K Royalty Free Video to 12K Premium Stock Footage"}
                            </h1>
                            <p class="text-lg text-gray-700">{"750+ Leading Nature and Underwater Video Professionals"}</p>
                            <p class="text-lg text-gray-700 mb-6">{"Over 6,000 Species Worldwide!"}</p>
                            <div class={classes!(
                                (*highlight_search).then_some("animate-pulse ring-4 ring-brand-teal-400 rounded-lg transition-all duration-500")
                            )}>
                                <SearchBar />
                            </div>
                            <CategoryButtons />
                        </div>
                        <div class="relative">
                            <PreviewReel />
                        </div>
                    </div>
                </section>

                <section id="browse" ref={browse_ref} class="py-16 bg-gray-50">
                    <div class="container mx-auto px-4">
                        <div class="text-center mb-10">
                            <h2 class="text-3xl font-bold mb-2">{"Browse Section"}</h2>
                            <p class="text-gray-600">{"Explore our categories of stunning nature footage from around the world."}</p>
                        </div>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                            { for BROWSE_CARDS.iter().map(browse_card) }
                        </div>
                    </div>
                </section>

                <section class="py-16 bg-brand-teal-600 text-white text-center">
                    <div class="container mx-auto px-4">
                        <h2 class="text-3xl font-bold mb-4">{"Ready to Enhance Your Projects?"}</h2>
                        <p class="mb-8">{"Access our premium collection of nature footage and elevate your creative work."}</p>
                        <div class="flex justify-center gap-4">
                            <button onclick={on_explore}
                                class="px-6 py-3 bg-white text-brand-teal-700 rounded-lg font-medium hover:bg-gray-100 transition-colors">
                                {"Explore Now"}
                            </button>
                            <a href="https://github.com/Hrishikesh332/TwelveLabs-Nature-Footage" target="_blank" rel="noopener noreferrer"
                                class="px-6 py-3 border border-white rounded-lg font-medium hover:bg-white/10 transition-colors">
                                {"Know More"}
                            </a>
                        </div>
                    </div>
                </section>
            </main>
            <SiteFooter />
        </div>
    }
}

fn browse_card(card: &BrowseCard) -> Html {
    html! {
        <Link<Route, SearchParams> to={Route::Search} query={Some(SearchParams::cached(card.query))}
            classes="block bg-white rounded-xl overflow-hidden shadow-md hover:shadow-xl transition-shadow group">
            <div class="relative h-56">
                <img src={card.image} alt={card.title} class="absolute inset-0 w-full h-full object-cover group-hover:scale-105 transition-transform duration-500" />
                <div class="absolute inset-0 bg-gradient-to-t from-black/50 to-transparent"></div>
                <div class="absolute top-3 right-3">
                    <span class="text-xs px-2 py-1 rounded-full bg-white/90 text-gray-800 font-medium">{ card.count }</span>
                </div>
            </div>
            <div class="p-5">
                <h3 class="text-xl font-semibold mb-1">{ card.title }</h3>
                <p class="text-gray-600 text-sm">{ format!("Premium {} footage", card.title.to_lowercase()) }</p>
                <div class="mt-3 flex items-center text-brand-teal-600 text-sm font-medium">
                    <span>{"Explore collection"}</span>
                    <span class="ml-1 group-hover:translate-x-1 transition-transform">{"→"}</span>
                </div>
            </div>
        </Link<Route, SearchParams>>
    }
}

fn scroll_into_view(node: &NodeRef) {
    if let Some(element) = node.cast::<web_sys::Element>() {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
