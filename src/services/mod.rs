//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own generation and session logic so route handlers can
//! stay focused on HTTP translation and cookie plumbing.

pub mod generate;
pub mod session;
