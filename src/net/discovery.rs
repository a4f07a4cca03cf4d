//! Bounded-concurrency LAN discovery, caching an immutable peer set (C7).

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::core::config::DiscoveryConfig;
use crate::core::errors::MeshfsError;
use crate::net::health;
use crate::net::subnet::{self, Ipv4Subnet};

/// An unordered set of peer identifiers (IPv4 address or resolved hostname).
pub type PeerSet = HashSet<String>;

/// Probe every host in every directly-attached private subnet and return
/// the set of peers that answered healthy.
///
/// A host with no private subnets, or on which no probe succeeds, yields an
/// empty (not erroring) peer set — LAN fan-out against an empty set is a
/// trivial empty-result operation.
///
/// # Errors
/// Returns an error only if local interface enumeration itself fails (an OS
/// error), never for individual probe failures.
pub async fn discover(client: &reqwest::Client, config: &DiscoveryConfig) -> crate::core::errors::Result<PeerSet> {
    let subnets = subnet::local_subnets()
        .map_err(|err| MeshfsError::Runtime {
            details: format!("interface enumeration failed: {err}"),
        })?;

    if subnets.is_empty() {
        warn!("no private ipv4 subnets found on this host");
        return Ok(PeerSet::new());
    }

    let hosts: Vec<_> = subnets
        .iter()
        .flat_map(Ipv4Subnet::hosts)
        .collect();
    info!(subnet_count = subnets.len(), host_count = hosts.len(), "starting lan discovery");

    let semaphore = Arc::new(Semaphore::new(config.max_probe_concurrency.max(1)));
    let mut tasks = Vec::with_capacity(hosts.len());

    for host in hosts {
        let semaphore = Arc::clone(&semaphore);
        let client = client.clone();
        let config = config.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            health::probe(&client, &config, host).await
        }));
    }

    let mut peers = PeerSet::new();
    for task in tasks {
        if let Ok(Some(identifier)) = task.await {
            peers.insert(identifier);
        }
    }

    info!(peer_count = peers.len(), "lan discovery complete");
    Ok(peers)
}
