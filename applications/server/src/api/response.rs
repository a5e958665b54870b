/// JSON envelope shared by every API response
use serde::Serialize;

pub const SUCCESS: &str = "success";
pub const FAIL: &str = "fail";

/// `{"status": ..., "message"?: ..., "data"?: ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Envelope that carries only a message
pub type MessageEnvelope = Envelope<()>;

impl MessageEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: FAIL,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: SUCCESS,
            message: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
