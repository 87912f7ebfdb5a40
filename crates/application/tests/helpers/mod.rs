mod mock_sources;

pub use mock_sources::{broken_reader, MissingResolvConf, MockResolvConf};
