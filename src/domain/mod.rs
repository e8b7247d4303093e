// Domain layer: request/response models and the seams (ports) the engine is built on.

pub mod model;
pub mod ports;
