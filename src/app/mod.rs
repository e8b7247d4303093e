// Application layer: turning estimates into something a caller can read.

pub mod report;
