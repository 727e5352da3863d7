//! # Name Generator Telegram Bot
//!
//! A Telegram bot that walks users through a country → gender → count
//! dialogue and replies with generated person names or fake person records,
//! inline for small batches and as a text file for large ones. Names are
//! sampled from per-country corpus files that the dataset builder generates
//! from locale tables.

pub mod bot;
pub mod config;
pub mod corpus;
pub mod dataset_builder;
pub mod dialogue;
pub mod errors;
pub mod fake_data;
pub mod locale_tables;
pub mod localization;
pub mod logging;
pub mod name_generator;
pub mod output_router;
pub mod sampling;
pub mod session_store;
pub mod text_normalization;
