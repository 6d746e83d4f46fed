// Domain layer: plain data models and the platform ports (interfaces) the helpers talk through.

pub mod model;
pub mod ports;
