pub mod bypass;

pub use bypass::ResolveBypassConfigUseCase;
