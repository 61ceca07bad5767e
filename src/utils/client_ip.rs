//! Client IP extraction from HTTP request headers.

use axum::http::{HeaderMap, HeaderName};
use std::net::SocketAddr;

/// Standard forwarded-for header consulted after the trusted proxy headers.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Determines the IP address to record for a click.
///
/// Priority:
/// 1. Each header in `trusted_headers`, in order (single value, e.g. `X-Real-IP`)
/// 2. `X-Forwarded-For`, first comma-separated entry
/// 3. The peer address of the connection
///
/// Empty or non-UTF-8 header values are skipped.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = extract_client_ip(&headers, &[], "127.0.0.1:4000".parse().unwrap());
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn extract_client_ip(
    headers: &HeaderMap,
    trusted_headers: &[HeaderName],
    peer: SocketAddr,
) -> String {
    let trusted = trusted_headers
        .iter()
        .find_map(|name| header_str(headers, name.as_str()));
    if let Some(ip) = trusted {
        return ip.to_string();
    }

    let forwarded = header_str(headers, X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    peer.ip().to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
