use crate::dns::pipeline::{DnsHandler, DnsRequest, ResponseWriter};
use crate::dns::wire_response::{self, RCODE_FORMERR};
use async_trait::async_trait;
use ferrous_split_domain::DomainError;
use hickory_proto::op::MessageType;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Entry point from the listener into the handler chain.
#[derive(Clone)]
pub struct DnsServerHandler {
    chain: Arc<dyn DnsHandler>,
}

impl DnsServerHandler {
    pub fn new(chain: Arc<dyn DnsHandler>) -> Self {
        Self { chain }
    }

    /// Runs one datagram through the chain and returns the reply to send, if
    /// any. Undecodable queries get FORMERR; stray responses are dropped.
    pub async fn handle_datagram(&self, buf: &[u8], src: SocketAddr) -> Option<Vec<u8>> {
        let request = match DnsRequest::from_bytes(buf, src) {
            Ok(request) => request,
            Err(e) => {
                debug!(client = %src, error = %e, "Malformed DNS query");
                return wire_response::build_error_response(buf, RCODE_FORMERR);
            }
        };

        if request.message().message_type() == MessageType::Response {
            debug!(client = %src, "Ignoring DNS response received on listener");
            return None;
        }

        debug!(
            client = %src,
            domain = ?request.first_question_name(),
            "DNS query received"
        );

        let mut writer = BufferedResponseWriter::default();
        self.chain.serve_dns(&mut writer, &request).await;
        writer.into_response()
    }
}

/// Writer that keeps the reply in memory for the caller to send.
#[derive(Debug, Default)]
pub struct BufferedResponseWriter {
    response: Option<Vec<u8>>,
}

impl BufferedResponseWriter {
    pub fn response(&self) -> Option<&[u8]> {
        self.response.as_deref()
    }

    pub fn into_response(self) -> Option<Vec<u8>> {
        self.response
    }
}

#[async_trait]
impl ResponseWriter for BufferedResponseWriter {
    async fn write_response(&mut self, bytes: &[u8]) -> Result<(), DomainError> {
        self.response = Some(bytes.to_vec());
        Ok(())
    }
}
