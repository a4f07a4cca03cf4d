//! Single-peer health probing (C6).

use std::net::{IpAddr, Ipv4Addr};

use crate::core::config::DiscoveryConfig;

/// Probe one address for a healthy peer.
///
/// Returns `Some(identifier)` when the peer answered `GET <health_path>`
/// with HTTP 200 within the configured deadline — the identifier is the
/// peer's reverse-DNS hostname if one resolves, otherwise its dotted IPv4
/// address. Any timeout, connection failure, or non-200 status is treated
/// as "not a peer", never as an error.
pub async fn probe(client: &reqwest::Client, config: &DiscoveryConfig, addr: Ipv4Addr) -> Option<String> {
    let url = config.health_url(&addr.to_string());

    let response = tokio::time::timeout(config.probe_deadline(), client.get(&url).send())
        .await
        .ok()?
        .ok()?;

    if !response.status().is_success() {
        return None;
    }

    Some(resolve_identifier(addr))
}

fn resolve_identifier(addr: Ipv4Addr) -> String {
    dns_lookup::lookup_addr(&IpAddr::V4(addr))
        .unwrap_or_else(|_| addr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(port: u16) -> DiscoveryConfig {
        let mut cfg = DiscoveryConfig::default();
        cfg.port = port;
        cfg
    }

    #[tokio::test]
    async fn healthy_peer_returns_some() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fs/health/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let port = server.address().port();
        let cfg = config_for(port);
        let client = reqwest::Client::new();
        let result = probe(&client, &cfg, Ipv4Addr::LOCALHOST).await;
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn non_200_status_is_not_a_peer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fs/health/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let cfg = config_for(server.address().port());
        let client = reqwest::Client::new();
        assert!(probe(&client, &cfg, Ipv4Addr::LOCALHOST).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_port_is_not_a_peer() {
        let cfg = config_for(1); // reserved, nothing listening
        let client = reqwest::Client::new();
        assert!(probe(&client, &cfg, Ipv4Addr::LOCALHOST).await.is_none());
    }

    #[tokio::test]
    async fn slow_peer_past_deadline_is_not_a_peer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fs/health/"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)))
            .mount(&server)
            .await;

        let mut cfg = config_for(server.address().port());
        cfg.probe_deadline_ms = 50;
        let client = reqwest::Client::new();
        assert!(probe(&client, &cfg, Ipv4Addr::LOCALHOST).await.is_none());
    }
}
