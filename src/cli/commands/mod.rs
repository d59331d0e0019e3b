//! CLI command implementations.

mod config;
mod mcp;
mod search;
mod transcript;
mod video;

pub use config::run_config;
pub use mcp::run_mcp;
pub use search::run_search;
pub use transcript::run_transcript;
pub use video::run_video;
