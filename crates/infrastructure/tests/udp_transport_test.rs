use ferrous_split_domain::DomainError;
use ferrous_split_infrastructure::dns::transport::{DnsTransport, UdpTransport};
use std::time::Duration;

mod helpers;
use helpers::{MockBehavior, MockDnsServer, QueryBuilder};

#[test]
fn test_udp_transport_creation() {
    let transport = UdpTransport::new("8.8.8.8:53".parse().unwrap());
    assert_eq!(transport.server_addr().port(), 53);
}

#[tokio::test]
async fn test_udp_exchange_returns_reply() {
    let server = MockDnsServer::start(MockBehavior::Answer).await.unwrap();
    let transport = UdpTransport::new(server.addr());

    let query = QueryBuilder::a("example.com.");
    let response = transport.send(&query, Duration::from_secs(1)).await.unwrap();

    assert_eq!(response.bytes, MockDnsServer::build_mock_response(&query));
}

#[tokio::test]
async fn test_udp_exchange_times_out() {
    let server = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let transport = UdpTransport::new(server.addr());

    let result = transport
        .send(&QueryBuilder::a("example.com."), Duration::from_millis(100))
        .await;

    assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
}

#[tokio::test]
async fn test_udp_exchange_rejects_mismatched_id() {
    let server = MockDnsServer::start(MockBehavior::WrongId).await.unwrap();
    let transport = UdpTransport::new(server.addr());

    let result = transport
        .send(&QueryBuilder::a("example.com."), Duration::from_millis(500))
        .await;

    assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
}
