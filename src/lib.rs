pub mod config;
pub mod desktop;
pub mod error;
pub mod flash;
pub mod gif_analyzer;
pub mod handler;
pub mod page;
pub mod server;
pub mod summary;
pub mod upload;

pub use config::{AppConfig, ConfigLoader, PartialConfig};
pub use error::GifError;
pub use gif_analyzer::{analyze_gif, GifAnalyzer, ScanOptions};
pub use server::{build_router, start_web_server};
pub use summary::{GifSummary, SummaryView};
