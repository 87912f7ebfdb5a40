mod logger;
mod resolv_conf_source;

pub use logger::Logger;
pub use resolv_conf_source::ResolvConfSource;
