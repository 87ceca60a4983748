//! Message reader seam.
//!
//! Parsing SDMX-ML or SDMX-JSON is left to a [`MessageReader`]; the
//! retrieval pipeline only needs to know whether a parsed message carries a
//! footer and whether it exposes data.

use serde::{Deserialize, Serialize};
use std::io::Read;

/// Trailer section of an SDMX message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Text lines in document order.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Footer {
    /// Creates a footer from its text lines.
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// What the retrieval pipeline needs to know about a parsed message.
pub trait SdmxMessage {
    /// Returns the message footer, if any.
    fn footer(&self) -> Option<&Footer>;

    /// Returns true if the message carries a dataset rather than structures.
    fn has_data(&self) -> bool;
}

/// Reads a parsed message from a byte stream.
pub trait MessageReader {
    /// The parsed message type.
    type Message: SdmxMessage;

    /// Error raised for malformed input.
    type Error: std::error::Error;

    /// Parses one message from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a readable message.
    fn read(&self, source: &mut dyn Read) -> Result<Self::Message, Self::Error>;
}
