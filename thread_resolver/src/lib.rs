pub mod api;
pub mod context;
pub mod render;
pub mod resolve;
#[cfg(test)]
mod testing;
pub mod thread;

pub use api::SocialApi;
pub use context::ThreadContext;
pub use render::render_status_html;
pub use resolve::{ChainKind, ResolvedThread, MAX_CHAIN_DEPTH};
pub use thread::RenderedThread;

pub use thread_core::{Error, Result};
