//! Responses and writer selection.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::SdmxMessage;

/// Downstream formatter recommended for a response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Writer {
    /// Tabular data writer.
    Data,
    /// Structural metadata writer.
    Structure,
    /// Caller-supplied writer identifier.
    Custom(String),
}

impl Writer {
    /// Returns the writer identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Data => "sdmx.writer.data",
            Self::Structure => "sdmx.writer.structure",
            Self::Custom(id) => id,
        }
    }

    /// Picks the default writer for a message.
    #[must_use]
    pub fn for_message<M: SdmxMessage + ?Sized>(message: &M) -> Self {
        if message.has_data() {
            Self::Data
        } else {
            Self::Structure
        }
    }
}

impl std::fmt::Display for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Writer {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sdmx.writer.data" | "data" => Self::Data,
            "sdmx.writer.structure" | "structure" => Self::Structure,
            other => Self::Custom(other.to_string()),
        })
    }
}

/// A parsed message with its provenance.
#[derive(Debug, Clone)]
pub struct Response<M> {
    /// The parsed message.
    pub message: M,
    /// Final URL after redirects; empty for local files.
    pub url: String,
    /// Response headers; empty for local files.
    pub headers: HashMap<String, String>,
    /// HTTP status code; `None` for local files.
    pub status: Option<u16>,
    /// Recommended downstream writer.
    pub writer: Writer,
}

impl<M: SdmxMessage> Response<M> {
    /// Assembles a response, choosing the default writer unless one is given.
    #[must_use]
    pub fn new(
        message: M,
        url: impl Into<String>,
        headers: HashMap<String, String>,
        status: Option<u16>,
        writer: Option<Writer>,
    ) -> Self {
        let writer = writer.unwrap_or_else(|| Writer::for_message(&message));
        Self {
            message,
            url: url.into(),
            headers,
            status,
            writer,
        }
    }
}

impl<M> Response<M> {
    /// Returns true if the response came back with HTTP 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }
}

/// Result of a retrieval.
#[derive(Debug, Clone)]
pub enum Outcome<M> {
    /// The requested message, or the message a footer redirect led to.
    Complete(Arc<Response<M>>),
    /// The message pointed at a redirect URL, but every attempt to fetch it failed.
    RedirectExhausted {
        /// The footer URL that was polled.
        url: String,
        /// Number of attempts made.
        attempts: u32,
        /// The placeholder message that carried the footer.
        placeholder: Response<M>,
    },
}

impl<M> Outcome<M> {
    /// Returns the completed response, if any.
    #[must_use]
    pub fn complete(self) -> Option<Arc<Response<M>>> {
        match self {
            Self::Complete(response) => Some(response),
            Self::RedirectExhausted { .. } => None,
        }
    }

    /// Returns true if the redirect budget was exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::RedirectExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Footer;

    struct Stub {
        data: bool,
    }

    impl SdmxMessage for Stub {
        fn footer(&self) -> Option<&Footer> {
            None
        }

        fn has_data(&self) -> bool {
            self.data
        }
    }

    #[test]
    fn test_default_writer_selection() {
        let response = Response::new(Stub { data: true }, "", HashMap::new(), Some(200), None);
        assert_eq!(response.writer, Writer::Data);

        let response = Response::new(Stub { data: false }, "", HashMap::new(), Some(200), None);
        assert_eq!(response.writer, Writer::Structure);
    }

    #[test]
    fn test_explicit_writer_wins() {
        let custom = Writer::Custom("my.writer".to_string());
        let response = Response::new(
            Stub { data: true },
            "",
            HashMap::new(),
            None,
            Some(custom.clone()),
        );
        assert_eq!(response.writer, custom);
        assert!(!response.is_ok());
    }

    #[test]
    fn test_writer_from_str() {
        assert_eq!("data".parse::<Writer>().unwrap(), Writer::Data);
        assert_eq!("sdmx.writer.structure".parse::<Writer>().unwrap(), Writer::Structure);
        assert_eq!(
            "x.y".parse::<Writer>().unwrap().to_string(),
            "x.y"
        );
    }
}
