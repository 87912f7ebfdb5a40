//! Request pipeline contract.
//!
//! A pipeline is a chain of [`DnsHandler`]s. Each [`Middleware`] wraps the
//! next handler and decides per request whether to answer itself or delegate.
//! The innermost handler is a terminal one (e.g. the upstream forwarder).

use async_trait::async_trait;
use ferrous_split_domain::DomainError;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::Arc;

/// An inbound query: the bytes as received plus their decoded form.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    raw: Arc<[u8]>,
    message: Message,
    src: SocketAddr,
}

impl DnsRequest {
    pub fn from_bytes(raw: impl Into<Arc<[u8]>>, src: SocketAddr) -> Result<Self, DomainError> {
        let raw = raw.into();
        let message =
            Message::from_vec(&raw).map_err(|e| DomainError::InvalidDnsRequest(e.to_string()))?;
        Ok(Self { raw, message, src })
    }

    /// Original wire bytes, untouched.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn src(&self) -> SocketAddr {
        self.src
    }

    pub fn id(&self) -> u16 {
        self.message.id()
    }

    /// Name of the first question, as sent (usually with a trailing dot).
    pub fn first_question_name(&self) -> Option<String> {
        self.message.queries().first().map(|q| q.name().to_ascii())
    }
}

/// Per-query sink for the reply sent back to the client.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_response(&mut self, bytes: &[u8]) -> Result<(), DomainError>;
}

#[async_trait]
pub trait DnsHandler: Send + Sync {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, request: &DnsRequest);
}

pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;

    fn wrap(self: Arc<Self>, next: Arc<dyn DnsHandler>) -> Arc<dyn DnsHandler>;

    fn stop(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Wraps `terminal` so that `middlewares[0]` sees each request first.
pub fn build_chain(
    middlewares: &[Arc<dyn Middleware>],
    terminal: Arc<dyn DnsHandler>,
) -> Arc<dyn DnsHandler> {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |next, middleware| Arc::clone(middleware).wrap(next))
}
