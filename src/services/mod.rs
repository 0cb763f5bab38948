pub mod export;
pub mod loader;
pub mod pipeline;

pub use export::{write_debug_files, DebugFiles};
pub use loader::{expand_inputs, Input, PageLoader};
pub use pipeline::ScanPipeline;
