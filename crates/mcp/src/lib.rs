// MCP adapter: exposes the volume controller as tools, resources and
// prompts over JSON-RPC on stdio.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::McpServer;
