use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Column names of the connection log, in field order.
pub const CONNECTION_LOG_HEADER: [&str; 6] =
    ["ts", "src_ip", "src_port", "dst_ip", "dst_port", "protocol"];

/// Port-bearing transport protocols a connection record can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportProtocol {
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportProtocol::Tcp => "TCP",
            TransportProtocol::Udp => "UDP",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the connection log, describing a single observed packet.
///
/// Field order is the column order of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Capture timestamp in whole seconds since the Unix epoch.
    pub ts: u64,
    pub src_ip: IpAddr,
    pub src_port: u16,
    pub dst_ip: IpAddr,
    pub dst_port: u16,
    pub protocol: TransportProtocol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_names() {
        assert_eq!(TransportProtocol::Tcp.to_string(), "TCP");
        assert_eq!(TransportProtocol::Udp.as_str(), "UDP");
    }
}
