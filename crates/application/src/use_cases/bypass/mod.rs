pub mod resolve_bypass_config;

pub use resolve_bypass_config::ResolveBypassConfigUseCase;
