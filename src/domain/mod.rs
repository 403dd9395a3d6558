// Domain layer: record types, query modes and the ports the engine talks through.

pub mod model;
pub mod ports;
