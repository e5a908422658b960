//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes statistics refresh, form building and configuration lookup to AI
//! assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod server;
pub mod types;

pub use server::{TranskitMcpServer, run_server};
