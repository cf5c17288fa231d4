//! roomcast server: password-gated rooms with chat history and a WebRTC
//! signaling relay, served over WebSocket.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
