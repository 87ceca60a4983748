//! Core types for the sdmx retrieval client.
//!
//! This crate provides the value types used throughout the workspace:
//!
//! - [`AgencyConfig`] - Agency name, endpoint and per-resource defaults
//! - [`SdmxError`] - Error taxonomy surfaced to callers
//! - [`ResourceType`] - Kind of SDMX artifact requested
//! - [`Key`] / [`DimensionKey`] - Series selection, raw or structured
//! - [`DataStructure`] - Ordered dimensions with allowed codes
//! - [`Request`] - A single logical retrieval request
//! - [`MessageReader`] / [`SdmxMessage`] - Parsing seam
//! - [`Response`] / [`Outcome`] - Parsed message with provenance

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod agency;
mod error;
mod key;
mod message;
mod request;
mod resource;
mod response;
mod structure;

pub use agency::{AgencyConfig, ResourceOverride};
pub use error::{Result, SdmxError};
pub use key::{DimensionKey, Key};
pub use message::{Footer, MessageReader, SdmxMessage};
pub use request::{FooterRetry, Request};
pub use resource::{Identifiable, ResourceType};
pub use response::{Outcome, Response, Writer};
pub use structure::{DataStructure, Dimension};
