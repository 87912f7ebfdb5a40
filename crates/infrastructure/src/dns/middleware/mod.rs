pub mod split;

pub use split::{SplitMiddleware, SplitSettings, DEFAULT_BYPASS_TIMEOUT};
