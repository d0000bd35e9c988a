//! Host metadata stamped onto every record.
//!
//! Nothing here is cached: the hostname and interface list are read again
//! on every dispatch.

use std::net::{IpAddr, Ipv4Addr};

/// Sentinel written when a host attribute cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Local hostname, or [`UNKNOWN`] when the OS lookup fails.
pub fn hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => UNKNOWN.to_string(),
    }
}

/// First non-loopback IPv4 address of the local interfaces, or
/// [`UNKNOWN`] when enumeration fails or no such address exists.
pub fn local_ipv4() -> String {
    let Ok(interfaces) = if_addrs::get_if_addrs() else {
        return UNKNOWN.to_string();
    };

    first_non_loopback_ipv4(interfaces.iter().map(|iface| iface.ip()))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Pick the first address that is IPv4 and not loopback, in enumeration order.
pub fn first_non_loopback_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
        // IPv4-mapped IPv6 addresses count as IPv4.
        IpAddr::V6(v6) => v6.to_ipv4_mapped().filter(|v4| !v4.is_loopback()),
        IpAddr::V4(_) => None,
    })
}
