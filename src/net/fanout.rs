//! LAN search fan-out dispatcher (C8): broadcast + partial-failure tolerant
//! aggregation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::config::DiscoveryConfig;
use crate::net::discovery::PeerSet;

/// Wire-compatible search request body POSTed to every peer.
#[derive(Debug, Clone, Serialize)]
pub struct FanoutRequest {
    pub path: String,
    pub scan_hidden_dirs: bool,
    pub scan_hidden_files: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_file_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_file_extensions: Option<Vec<String>>,
}

/// A single peer's contribution to a fan-out: either its real search result
/// or a pseudo-result carrying `__error__` when that peer was unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSearchResult {
    pub count: u64,
    pub result: serde_json::Value,
}

impl PeerSearchResult {
    fn error(message: impl Into<String>) -> Self {
        Self {
            count: 0,
            result: serde_json::json!({ "__error__": [message.into()] }),
        }
    }
}

/// Broadcast `request` to every peer in `peers` concurrently and aggregate
/// the responses. Every peer appears in the result: a peer that fails
/// (connection error, timeout, or a non-2xx/invalid-JSON response) is
/// represented by an error pseudo-result rather than being dropped.
pub async fn fan_out(
    client: &reqwest::Client,
    config: &DiscoveryConfig,
    peers: &PeerSet,
    request: &FanoutRequest,
) -> HashMap<String, PeerSearchResult> {
    let mut tasks = Vec::with_capacity(peers.len());

    for peer in peers {
        let client = client.clone();
        let url = config.search_url(peer);
        let timeout = config.fanout_timeout();
        let peer = peer.clone();
        let body = request.clone();
        tasks.push(tokio::spawn(async move {
            let outcome = dispatch_one(&client, &url, timeout, &body).await;
            (peer, outcome)
        }));
    }

    let mut aggregate = HashMap::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok((peer, result)) => {
                aggregate.insert(peer, result);
            }
            Err(join_err) => {
                warn!(%join_err, "fan-out task panicked");
            }
        }
    }
    aggregate
}

async fn dispatch_one(
    client: &reqwest::Client,
    url: &str,
    timeout: std::time::Duration,
    body: &FanoutRequest,
) -> PeerSearchResult {
    let attempt = async {
        let response = client.post(url).json(body).send().await?;
        let response = response.error_for_status()?;
        response.json::<PeerSearchResult>().await
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => PeerSearchResult::error(err.to_string()),
        Err(_elapsed) => PeerSearchResult::error("request timed out"),
    }
}
