//! Per-packet extraction of connection records.
//!
//! Each packet is decoded on its own: no state is carried from one packet to
//! the next. Packets without an IP layer or without a TCP/UDP layer, and
//! packets that fail to slice, are skipped without being reported.
//!
//! Slicing is lax: a packet cut short by the capture snap length still
//! decodes as long as its IP and TCP/UDP headers are complete.

use std::net::IpAddr;

use etherparse::{LaxNetSlice, LaxSlicedPacket, LinuxSllProtocolType, LinuxSllSlice, TransportSlice};
use tracing::trace;

use crate::domain::entities::{ConnectionRecord, LinkType, RawPacket, TransportProtocol};

/// Decode one captured packet into a connection record.
pub fn decode_packet(packet: &RawPacket) -> Option<ConnectionRecord> {
    let sliced = match packet.link_type {
        LinkType::Ethernet => LaxSlicedPacket::from_ethernet(&packet.data).ok()?,
        LinkType::RawIp => LaxSlicedPacket::from_ip(&packet.data).ok()?,
        LinkType::LinuxSll => linux_sll(&packet.data)?,
        LinkType::Unsupported(_) => return None,
    };

    let (src_ip, dst_ip) = network_endpoints(&sliced)?;
    let (src_port, dst_port, protocol) = transport_endpoints(&sliced)?;

    Some(ConnectionRecord {
        ts: packet.timestamp.as_secs(),
        src_ip,
        src_port,
        dst_ip,
        dst_port,
        protocol,
    })
}

// Only SLL frames carrying an EtherType can hold IP
fn linux_sll(data: &[u8]) -> Option<LaxSlicedPacket<'_>> {
    let sll = LinuxSllSlice::from_slice(data).ok()?;
    match sll.protocol_type() {
        LinuxSllProtocolType::EtherType(ether_type) => {
            Some(LaxSlicedPacket::from_ether_type(ether_type, sll.payload_slice()))
        }
        _ => None,
    }
}

fn network_endpoints(sliced: &LaxSlicedPacket<'_>) -> Option<(IpAddr, IpAddr)> {
    match &sliced.net {
        Some(LaxNetSlice::Ipv4(ipv4)) => {
            let header = ipv4.header();
            Some((
                IpAddr::from(header.source_addr()),
                IpAddr::from(header.destination_addr()),
            ))
        }
        Some(LaxNetSlice::Ipv6(ipv6)) => {
            let header = ipv6.header();
            Some((
                IpAddr::from(header.source_addr()),
                IpAddr::from(header.destination_addr()),
            ))
        }
        _ => None,
    }
}

fn transport_endpoints(sliced: &LaxSlicedPacket<'_>) -> Option<(u16, u16, TransportProtocol)> {
    match &sliced.transport {
        Some(TransportSlice::Tcp(tcp)) => Some((
            tcp.source_port(),
            tcp.destination_port(),
            TransportProtocol::Tcp,
        )),
        Some(TransportSlice::Udp(udp)) => Some((
            udp.source_port(),
            udp.destination_port(),
            TransportProtocol::Udp,
        )),
        // ICMP and friends carry no ports
        _ => None,
    }
}

/// Counters for one pass over a packet source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub packets_read: u64,
    pub records_emitted: u64,
    pub packets_skipped: u64,
}

/// Lazily turns a packet sequence into connection records, one packet at a
/// time.
pub struct PacketDecoder<S> {
    source: S,
    stats: DecodeStats,
}

impl<S> PacketDecoder<S>
where
    S: Iterator<Item = RawPacket>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            stats: DecodeStats::default(),
        }
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Iterator for PacketDecoder<S>
where
    S: Iterator<Item = RawPacket>,
{
    type Item = ConnectionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for packet in &mut self.source {
            self.stats.packets_read += 1;

            match decode_packet(&packet) {
                Some(record) => {
                    self.stats.records_emitted += 1;
                    return Some(record);
                }
                None => {
                    self.stats.packets_skipped += 1;
                    trace!(
                        packet = self.stats.packets_read,
                        len = packet.len(),
                        "skipping packet without IP and TCP/UDP layers"
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod test_packets {
    use etherparse::PacketBuilder;

    const SRC_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
    const DST_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];

    pub fn ipv4_tcp(src: [u8; 4], dst: [u8; 4], src_port: u16, dst_port: u16) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
            .ipv4(src, dst, 64)
            .tcp(src_port, dst_port, 1000, 65535);
        let payload = b"hello";
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, payload).unwrap();
        frame
    }

    pub fn ipv4_udp(src: [u8; 4], dst: [u8; 4], src_port: u16, dst_port: u16) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
            .ipv4(src, dst, 64)
            .udp(src_port, dst_port);
        let payload = [0u8; 12];
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, &payload).unwrap();
        frame
    }

    pub fn ipv6_udp(src: [u8; 16], dst: [u8; 16], src_port: u16, dst_port: u16) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
            .ipv6(src, dst, 64)
            .udp(src_port, dst_port);
        let payload = [0u8; 4];
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, &payload).unwrap();
        frame
    }

    pub fn ipv4_icmp_echo(src: [u8; 4], dst: [u8; 4]) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
            .ipv4(src, dst, 64)
            .icmpv4_echo_request(1, 1);
        let payload = [0u8; 8];
        let mut frame = Vec::with_capacity(builder.size(payload.len()));
        builder.write(&mut frame, &payload).unwrap();
        frame
    }

    /// Bare IPv4/TCP with no link header
    pub fn raw_ipv4_tcp(src: [u8; 4], dst: [u8; 4], src_port: u16, dst_port: u16) -> Vec<u8> {
        let builder = PacketBuilder::ipv4(src, dst, 64).tcp(src_port, dst_port, 1, 1024);
        let mut packet = Vec::with_capacity(builder.size(0));
        builder.write(&mut packet, &[]).unwrap();
        packet
    }

    /// ARP request: Ethernet frame with no IP layer
    pub fn arp_request() -> Vec<u8> {
        let mut frame = Vec::with_capacity(42);
        frame.extend_from_slice(&[0xff; 6]);
        frame.extend_from_slice(&SRC_MAC);
        frame.extend_from_slice(&[0x08, 0x06]);
        frame.extend_from_slice(&[0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01]);
        frame.extend_from_slice(&SRC_MAC);
        frame.extend_from_slice(&[192, 168, 1, 10]);
        frame.extend_from_slice(&[0x00; 6]);
        frame.extend_from_slice(&[192, 168, 1, 1]);
        frame
    }
}
