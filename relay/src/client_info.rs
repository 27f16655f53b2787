//! Who sent a submission, as far as the request tells us.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;

pub const UNKNOWN_IP: &str = "Unknown IP";
pub const UNKNOWN_DEVICE: &str = "Unknown Device";

/// Proxy headers consulted before the socket peer, in priority order.
const FORWARDING_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            ip: client_ip(headers, peer),
            user_agent: header_value(headers, USER_AGENT.as_str())
                .unwrap_or(UNKNOWN_DEVICE)
                .to_string(),
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// First forwarding header wins; `X-Forwarded-For` contributes only its
/// first (client-most) entry.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    for name in FORWARDING_HEADERS {
        let Some(value) = header_value(headers, name) else {
            continue;
        };
        let first = value.split(',').next().map(str::trim).unwrap_or_default();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}
