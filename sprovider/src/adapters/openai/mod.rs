mod serde_api;
#[cfg(test)]
mod tests;
mod transport;
mod types;

pub(crate) use transport::map_send_error;
pub use transport::{OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAssistantMessage, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse,
    OpenAiRole, OpenAiTool, OpenAiToolCall, OpenAiUsage,
};
