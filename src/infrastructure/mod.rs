// Infrastructure layer - concrete implementations of domain ports
// This layer contains adapters that connect domain logic to external systems

// Core adapters organized by technology/responsibility
pub mod capture;        // Zeek engine invocation
pub mod file_system;    // tokio directory operations
pub mod logging;        // tracing subscriber setup
pub mod notification;   // Console/terminal user interaction
pub mod pcap;           // Offline pcap packet source
pub mod process;        // System process execution
pub mod storage;        // CSV connection log output

// Factories for creating adapter instances
pub mod factories;

// Re-export commonly used adapters
pub use capture::*;
pub use file_system::*;
pub use logging::*;
pub use notification::*;
pub use pcap::*;
pub use process::*;
pub use storage::*;
pub use factories::*;
