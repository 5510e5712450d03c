use std::net::{Ipv4Addr, SocketAddr};
use tandem_core::IceServerConfig;

pub const DEFAULT_PORT: u16 = 3000;

/// Public STUN servers browsers fall back to when nothing else is configured.
pub const DEFAULT_STUN_SERVERS: [&str; 2] = [
    "stun:stun.l.google.com:19302",
    "stun:stun1.l.google.com:19302",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Advertised to every client right after it connects.
    pub ice_servers: Vec<IceServerConfig>,
    /// Capacity of the queue between socket handlers and the room manager.
    pub command_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            ice_servers: DEFAULT_STUN_SERVERS
                .iter()
                .map(|url| IceServerConfig::stun(*url))
                .collect(),
            command_buffer: 100,
        }
    }
}
