pub mod api;
pub mod components;
pub mod page;
pub mod pagination;

pub use components::SearchBar;
pub use page::SearchPage;
