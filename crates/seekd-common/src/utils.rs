//! Utility functions for Seekd
//!
//! Common helper functions used across the codebase.

use if_addrs::IfAddr;

/// Get the local server address
///
/// Returns the first non-loopback IPv4 address found,
/// or "127.0.0.1" as fallback. Node identity downstream depends on
/// this value when the configuration leaves `server.address` unset.
///
/// # Examples
///
/// ```
/// use seekd_common::local_address;
///
/// let addr = local_address();
/// assert!(!addr.is_empty());
/// ```
pub fn local_address() -> String {
    if_addrs::get_if_addrs()
        .ok()
        .and_then(|addrs| {
            addrs
                .into_iter()
                .find(|iface| !iface.is_loopback() && matches!(iface.addr, IfAddr::V4(_)))
                .and_then(|iface| match iface.addr {
                    IfAddr::V4(addr) => Some(addr.ip.to_string()),
                    _ => None,
                })
        })
        .unwrap_or_else(|| "127.0.0.1".to_string())
}
