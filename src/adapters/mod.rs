// Adapters layer: concrete implementations for external systems (HTTP service, filesystem).

pub mod http;
pub mod storage;
