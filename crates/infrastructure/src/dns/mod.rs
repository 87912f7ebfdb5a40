pub mod middleware;
pub mod pipeline;
pub mod server;
pub mod transport;
pub mod upstream;
pub mod wire_response;

pub use middleware::{SplitMiddleware, SplitSettings};
pub use pipeline::{build_chain, DnsHandler, DnsRequest, Middleware, ResponseWriter};
pub use server::{BufferedResponseWriter, DnsServerHandler};
pub use upstream::UpstreamForwarder;
