//! Inbound adapters exposing the domain to callers.

pub mod http;
