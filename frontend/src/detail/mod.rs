pub mod api;
mod components;
mod metadata;
mod page;
mod player;
pub mod resolve;

pub use page::DetailPage;
