pub mod capture;       // Analysis engine and packet source
pub mod file_system;   // Directory operations
pub mod process;       // System process execution
pub mod record;        // Connection log output

pub mod notification;  // User notification abstractions

pub use capture::*;
pub use file_system::*;
pub use process::*;
pub use record::*;
pub use notification::*;
