//! Client-side retrieval of SDMX statistical data and metadata.
//!
//! This is a facade crate that re-exports functionality from the sdmx
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use sdmx_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = SdmxClient::with_http(
//!         "ECB",
//!         AgencyRegistry::from_env(),
//!         ClientConfig::default(),
//!         JsonMessageReader,
//!     )?;
//!
//!     let request = Request::new()
//!         .resource_type(ResourceType::Data)
//!         .resource_id("EXR")
//!         .key("M.USD.EUR.SP00.A")
//!         .cache_token("exr-monthly");
//!
//!     match client.get(request).await? {
//!         Outcome::Complete(response) => println!("{} -> {}", response.url, response.writer),
//!         Outcome::RedirectExhausted { url, .. } => eprintln!("{url} never became available"),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use sdmx_types::*;

// Re-export agency registry
pub use sdmx_agencies::{AgencyRegistry, DEFAULT_ENDPOINT, ENDPOINT_ENV};

// Re-export retrieval pipeline
#[cfg(feature = "fetch")]
pub use sdmx_fetch::{
    ClientConfig, ContainerError, HttpTransport, JsonMessage, JsonMessageReader, RawPayload,
    ResolvedTarget, ResponseCache, SdmxClient, StaticStructures, StructureLookup, Transport,
    TransportError,
};

/// Prelude module for convenient imports.
///
/// ```
/// use sdmx_lib::prelude::*;
/// ```
pub mod prelude {
    pub use sdmx_types::{
        DataStructure, Dimension, DimensionKey, FooterRetry, Key, Outcome, Request, ResourceType,
        Response, Result, SdmxError, Writer,
    };

    pub use sdmx_agencies::AgencyRegistry;

    #[cfg(feature = "fetch")]
    pub use sdmx_fetch::{
        ClientConfig, HttpTransport, JsonMessageReader, SdmxClient, StaticStructures,
        StructureLookup,
    };
}
