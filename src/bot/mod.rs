//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming messages and delivers results through a message channel
//! - `ui_builder`: Creates keyboards and formats messages
//! - `dialogue_manager`: Manages dialogue state transitions and validation

pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use message_handler::{message_handler, process_text, MessageChannel, TelegramChannel};

// Re-export the dialogue driver and its output types
pub use dialogue_manager::{Action, FakeDataResult, NamesResult, SessionMachine};
pub use ui_builder::{render_action, Keyboard, Outbound};
