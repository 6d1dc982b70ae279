use std::time::Duration;

/// Link-layer framing of a captured packet, taken from the capture header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Ethernet,
    /// Bare IPv4 or IPv6 with no link header.
    RawIp,
    /// Linux "cooked" capture (SLL).
    LinuxSll,
    Unsupported(u32),
}

/// One packet as recorded by the capture source, before any decoding.
#[derive(Debug, Clone)]
pub struct RawPacket {
    /// Capture timestamp, relative to the Unix epoch.
    pub timestamp: Duration,
    pub link_type: LinkType,
    pub data: Vec<u8>,
}

impl RawPacket {
    pub fn new(timestamp: Duration, link_type: LinkType, data: Vec<u8>) -> Self {
        Self {
            timestamp,
            link_type,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
