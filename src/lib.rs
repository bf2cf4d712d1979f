//! Monastery guide server
//!
//! Bilingual (English/Hindi) keyword responder for the Sikkim monasteries
//! project, served over HTTP as `POST /chat` next to the single-page UI.

pub mod config;
pub mod handler;
pub mod http;
pub mod knowledge;
pub mod logger;
pub mod responder;
pub mod server;
