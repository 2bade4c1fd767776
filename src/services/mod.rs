pub mod progress;
pub mod render_service;

pub use progress::{ProgressReporter, ProgressUpdate};
pub use render_service::RenderService;
