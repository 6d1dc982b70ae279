use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use pcap_file::pcap::PcapReader;
use pcap_file::DataLink;
use tracing::{debug, warn};

use crate::domain::entities::{LinkType, RawPacket};
use crate::domain::ports::capture::PacketSource;
use crate::error::PipelineError;

// ============================================================================
// PCAP FILE SOURCE
// ============================================================================

/// Reads packets from a classic pcap file, one at a time.
///
/// A read error part way through the capture ends the sequence; the packets
/// already returned stand and `truncated()` reports what happened.
pub struct PcapFileSource<R: Read = BufReader<File>> {
    path: PathBuf,
    reader: PcapReader<R>,
    link_type: LinkType,
    packets_read: u64,
    truncated: bool,
    finished: bool,
}

impl PcapFileSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|e| PipelineError::CaptureOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Self::from_reader(BufReader::new(file), path)
    }
}

impl<R: Read> PcapFileSource<R> {
    /// Parse the global header from `reader`; `path` is only used in
    /// diagnostics.
    pub fn from_reader(reader: R, path: &Path) -> Result<Self, PipelineError> {
        let reader = PcapReader::new(reader).map_err(|e| PipelineError::CaptureOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let header = reader.header();
        let link_type = link_type_of(header.datalink);
        match link_type {
            LinkType::Unsupported(code) => warn!(
                capture = %path.display(),
                datalink = code,
                "unsupported link type, no packets will decode"
            ),
            _ => debug!(
                capture = %path.display(),
                ?link_type,
                snaplen = header.snaplen,
                "opened capture"
            ),
        }

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            link_type,
            packets_read: 0,
            truncated: false,
            finished: false,
        })
    }
}

impl<R: Read> Iterator for PcapFileSource<R> {
    type Item = RawPacket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.next_packet() {
            Some(Ok(packet)) => {
                self.packets_read += 1;
                Some(RawPacket::new(
                    packet.timestamp,
                    self.link_type,
                    packet.data.into_owned(),
                ))
            }
            Some(Err(e)) => {
                warn!(
                    capture = %self.path.display(),
                    after_packets = self.packets_read,
                    error = %e,
                    "capture ended early, keeping packets read so far"
                );
                self.truncated = true;
                self.finished = true;
                None
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl<R: Read> PacketSource for PcapFileSource<R> {
    fn link_type(&self) -> LinkType {
        self.link_type
    }

    fn truncated(&self) -> bool {
        self.truncated
    }
}

fn link_type_of(datalink: DataLink) -> LinkType {
    match datalink {
        DataLink::ETHERNET => LinkType::Ethernet,
        DataLink::RAW | DataLink::IPV4 | DataLink::IPV6 => LinkType::RawIp,
        DataLink::LINUX_SLL => LinkType::LinuxSll,
        other => LinkType::Unsupported(u32::from(other)),
    }
}


#[cfg(test)]
mod tests {
    use super::test_captures::write_capture;
    use super::*;
    use crate::domain::services::decoder::test_packets;
    use tempfile::TempDir;

    #[test]
    fn test_reads_packets_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.pcap");
        write_capture(
            &path,
            DataLink::ETHERNET,
            &[
                (1_700_000_000, test_packets::ipv4_tcp([10, 0, 0, 1], [10, 0, 0, 2], 1234, 80)),
                (1_700_000_001, test_packets::arp_request()),
            ],
        );

        let mut source = PcapFileSource::open(&path).unwrap();
        assert_eq!(source.link_type(), LinkType::Ethernet);

        let first = source.next().unwrap();
        assert_eq!(first.timestamp.as_secs(), 1_700_000_000);
        assert_eq!(first.link_type, LinkType::Ethernet);
        let second = source.next().unwrap();
        assert_eq!(second.timestamp.as_secs(), 1_700_000_001);
        assert_eq!(second.data, test_packets::arp_request());

        assert!(source.next().is_none());
        assert!(source.next().is_none());
        assert!(!source.truncated());
    }

    #[test]
    fn test_raw_ip_link_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("raw.pcap");
        write_capture(
            &path,
            DataLink::RAW,
            &[(5, test_packets::raw_ipv4_tcp([1, 1, 1, 1], [2, 2, 2, 2], 1, 2))],
        );

        let source = PcapFileSource::open(&path).unwrap();
        assert_eq!(source.link_type(), LinkType::RawIp);
        assert_eq!(source.count(), 1);
    }

    #[test]
    fn test_empty_capture_has_no_packets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.pcap");
        write_capture(&path, DataLink::ETHERNET, &[]);

        let mut source = PcapFileSource::open(&path).unwrap();
        assert!(source.next().is_none());
        assert!(!source.truncated());
    }

    #[test]
    fn test_truncated_capture_keeps_earlier_packets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cut.pcap");
        write_capture(
            &path,
            DataLink::ETHERNET,
            &[
                (1, test_packets::ipv4_udp([10, 0, 0, 1], [10, 0, 0, 2], 53, 5353)),
                (2, test_packets::ipv4_udp([10, 0, 0, 1], [10, 0, 0, 2], 53, 5353)),
            ],
        );
        // Chop the tail off the second packet's data.
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

        let mut source = PcapFileSource::open(&path).unwrap();
        assert!(source.next().is_some());
        assert!(source.next().is_none());
        assert!(source.truncated());
        assert!(source.next().is_none());
    }

    #[test]
    fn test_not_a_capture() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, b"this is plainly not a pcap file header").unwrap();

        match PcapFileSource::open(&path) {
            Err(PipelineError::CaptureOpen { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("expected CaptureOpen, got {:?}", other),
            Ok(_) => panic!("expected CaptureOpen"),
        }
    }

    #[test]
    fn test_missing_capture_cannot_open() {
        let temp_dir = TempDir::new().unwrap();
        let result = PcapFileSource::open(&temp_dir.path().join("absent.pcap"));
        assert!(matches!(result, Err(PipelineError::CaptureOpen { .. })));
    }
}
