// Domain layer - entities, the ports they are moved through, and the
// services that hold the core logic. No dependency on infrastructure.

pub mod entities;
pub mod ports;
pub mod services;
