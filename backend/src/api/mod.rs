mod relay;
mod search;
mod similar;
mod status;
mod video;

#[cfg(test)]
mod tests;

pub use search::*;
pub use similar::*;
pub use status::*;
pub use video::*;
