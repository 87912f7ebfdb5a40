use crate::dns::pipeline::{DnsHandler, DnsRequest, ResponseWriter};
use crate::dns::transport::{DnsTransport, UdpTransport};
use crate::dns::wire_response;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Terminal pipeline handler: relays queries to the regular upstream servers.
///
/// Servers are tried in configuration order; the first reply wins. When every
/// server fails the client gets SERVFAIL.
pub struct UpstreamForwarder {
    transports: Vec<UdpTransport>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(servers: &[SocketAddr], timeout: Duration) -> Self {
        debug!(servers = servers.len(), "Upstream forwarder created");
        Self {
            transports: servers.iter().copied().map(UdpTransport::new).collect(),
            timeout,
        }
    }
}

#[async_trait]
impl DnsHandler for UpstreamForwarder {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, request: &DnsRequest) {
        for transport in &self.transports {
            match transport.send(request.raw(), self.timeout).await {
                Ok(response) => {
                    if let Err(e) = writer.write_response(&response.bytes).await {
                        error!(client = %request.src(), error = %e, "Failed to send response");
                    }
                    return;
                }
                Err(e) => {
                    warn!(
                        server = %transport.server_addr(),
                        error = %e,
                        "Upstream query failed"
                    );
                }
            }
        }

        error!(
            domain = ?request.first_question_name(),
            "All upstream servers are unreachable"
        );
        if let Some(reply) = wire_response::build_servfail_response(request.raw()) {
            if let Err(e) = writer.write_response(&reply).await {
                error!(client = %request.src(), error = %e, "Failed to send error response");
            }
        }
    }
}
