//! Local IPv4 subnet enumeration, filtered to private ranges (C5).

use std::collections::HashSet;
use std::net::Ipv4Addr;

/// An IPv4 network: base address with host bits cleared, plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Subnet {
    pub network: Ipv4Addr,
    pub prefix_len: u8,
}

impl Ipv4Subnet {
    #[must_use]
    pub fn new(address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        let prefix_len = u32::from(netmask).count_ones() as u8;
        let network = Ipv4Addr::from(u32::from(address) & u32::from(netmask));
        Self {
            network,
            prefix_len,
        }
    }

    /// All usable host addresses in this network (network and broadcast
    /// addresses excluded). Empty for point-to-point (`/31`) and host
    /// (`/32`) networks, which have no broadcast/network split.
    #[must_use]
    pub fn hosts(&self) -> Vec<Ipv4Addr> {
        if self.prefix_len >= 31 {
            return Vec::new();
        }
        let host_bits = 32 - u32::from(self.prefix_len);
        let base = u32::from(self.network);
        let count = 1u32 << host_bits;
        (1..count - 1).map(|i| Ipv4Addr::from(base + i)).collect()
    }
}

/// Whether an address falls in a range this system should ever treat as a
/// LAN peer: excludes loopback, link-local, multicast, unspecified, and
/// anything outside RFC 1918 private space.
#[must_use]
pub fn is_discoverable(addr: Ipv4Addr) -> bool {
    addr.is_private() && !addr.is_loopback() && !addr.is_link_local() && !addr.is_multicast() && !addr.is_unspecified()
}

/// Enumerate every private IPv4 subnet this host is directly attached to.
///
/// # Errors
/// Propagates the underlying OS error from interface enumeration.
pub fn local_subnets() -> std::io::Result<HashSet<Ipv4Subnet>> {
    let interfaces = if_addrs::get_if_addrs()?;
    let mut subnets = HashSet::new();

    for iface in interfaces {
        let if_addrs::IfAddr::V4(v4) = iface.addr else {
            continue;
        };
        if !is_discoverable(v4.ip) {
            continue;
        }
        subnets.insert(Ipv4Subnet::new(v4.ip, v4.netmask));
    }

    Ok(subnets)
}
