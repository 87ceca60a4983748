//! Resource resolution and retrieval pipeline for the sdmx client.
//!
//! This crate turns a [`Request`](sdmx_types::Request) into a response:
//!
//! - [`TargetBuilder`](crate::url::TargetBuilder) - Builds the request URL, parameters and headers
//! - [`key::resolve_key`] - Renders structured keys against a data structure
//! - [`Transport`] / [`HttpTransport`] - Fetches bytes over HTTP or from a file
//! - [`unzip::read_unwrapped`] - Reads through single-member zip archives
//! - [`footer::follow`] - Polls footer redirect URLs
//! - [`ResponseCache`] - Memoizes responses per client
//! - [`SdmxClient`] - Runs the whole pipeline

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod client;
pub mod footer;
pub mod key;
mod pipeline;
mod reader;
pub mod unzip;
pub mod url;

pub use cache::ResponseCache;
pub use client::{
    ClientConfig, HttpTransport, RawPayload, Transport, TransportError, read_source_file,
};
pub use key::{StaticStructures, StructureLookup};
pub use pipeline::SdmxClient;
pub use reader::{JsonMessage, JsonMessageReader};
pub use unzip::ContainerError;
pub use crate::url::ResolvedTarget;
