#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_split_application::ports::Logger;
use ferrous_split_domain::DomainError;
use ferrous_split_infrastructure::dns::{DnsHandler, DnsRequest, ResponseWriter};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Mutex;

pub const NEXT_HANDLER_REPLY: &[u8] = b"next-handler";

pub fn client_addr() -> SocketAddr {
    "192.168.1.100:40000".parse().unwrap()
}

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn a(domain: &str) -> Vec<u8> {
        let mut query = Query::new();
        query.set_name(Name::from_str(domain).unwrap());
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);
        Self::serialize(&message)
    }

    pub fn without_questions() -> Vec<u8> {
        let message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        Self::serialize(&message)
    }

    pub fn request(bytes: Vec<u8>) -> DnsRequest {
        DnsRequest::from_bytes(bytes, client_addr()).unwrap()
    }

    fn serialize(message: &Message) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).unwrap();
        buf
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    infos: Mutex<Vec<String>>,
    warns: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn warns(&self) -> Vec<String> {
        self.warns.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warns.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Stand-in for the rest of the pipeline; remembers what reached it.
#[derive(Default)]
pub struct RecordingHandler {
    called: Mutex<Vec<Option<String>>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> usize {
        self.called.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<Option<String>> {
        self.called.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsHandler for RecordingHandler {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, request: &DnsRequest) {
        self.called
            .lock()
            .unwrap()
            .push(request.first_question_name());
        let _ = writer.write_response(NEXT_HANDLER_REPLY).await;
    }
}

/// Writer whose client has gone away.
pub struct FailingWriter;

#[async_trait]
impl ResponseWriter for FailingWriter {
    async fn write_response(&mut self, _bytes: &[u8]) -> Result<(), DomainError> {
        Err(DomainError::IoError("client went away".to_string()))
    }
}
