//! Minimal JSON envelope reader.
//!
//! Decodes just enough of a JSON message to drive the pipeline: whether it
//! carries data or structures, and its footer lines. The payload sections
//! are kept as raw JSON values for a downstream writer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

use sdmx_types::{Footer, MessageReader, SdmxMessage};

/// A message decoded by [`JsonMessageReader`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonMessage {
    /// Message header, as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// Dataset section, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Structure section, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Value>,
    /// Footer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

impl SdmxMessage for JsonMessage {
    fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Reads [`JsonMessage`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMessageReader;

impl MessageReader for JsonMessageReader {
    type Message = JsonMessage;
    type Error = serde_json::Error;

    fn read(&self, source: &mut dyn Read) -> Result<Self::Message, Self::Error> {
        serde_json::from_reader(source)
    }
}
