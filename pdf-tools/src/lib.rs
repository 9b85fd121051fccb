//! PDF tool front-end model.
//!
//! The tool grid, file picking rules, simulated conversions and the per-user
//! session state behind them. Only the two AI tools leave the process, through
//! [`ai_gateway::DocumentAssistant`].

pub mod catalog;
pub mod error;
pub mod messages;
pub mod processor;
pub mod session;
pub mod store;
pub mod upload;

pub use catalog::{ToolDescriptor, ToolKind, tool_catalog};
pub use error::{ToolError, ToolResult};
pub use messages::Messages;
pub use processor::{PlaceholderArtifact, SimulatedProcessor};
pub use session::{ChatMessage, ChatRole, SessionId, SessionSnapshot, ToolOutput, ToolSession};
pub use store::SessionStore;
pub use upload::UploadedFile;
