//! # State Module
//!
//! The two state objects a command can ask for.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │      ConfigState         │      │       SessionState           │    │
//! │  │                          │─────►│                              │    │
//! │  │  ClientConfig            │      │  SessionStore (restored)     │    │
//! │  │  config file path        │      │  ui settings                 │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  Config commands only need ConfigState and never touch the network.    │
//! │  Everything else opens a SessionState first.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ConfigState;
pub use session::SessionState;
