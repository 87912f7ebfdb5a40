mod builders;
mod dns_server_mock;

pub use builders::{
    client_addr, FailingWriter, QueryBuilder, RecordingHandler, RecordingLogger,
    NEXT_HANDLER_REPLY,
};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
