pub mod server;
pub mod types;

pub use server::{McpServer, PROTOCOL_VERSION};
pub use types::{RpcError, RpcRequest, RpcResponse};
