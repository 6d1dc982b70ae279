pub mod capture;
pub mod connection;
pub mod log_layout;
pub mod packet;

pub use capture::*;
pub use connection::*;
pub use log_layout::*;
pub use packet::*;
