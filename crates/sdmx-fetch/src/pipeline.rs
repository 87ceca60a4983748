//! The retrieval pipeline.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use sdmx_agencies::AgencyRegistry;
use sdmx_types::{
    Key, MessageReader, Outcome, Request, ResourceType, Response, Result, SdmxError, SdmxMessage,
    Writer,
};

use crate::cache::ResponseCache;
use crate::client::{ClientConfig, HttpTransport, RawPayload, Transport};
use crate::footer::{self, Redirect};
use crate::key::{self, StructureLookup};
use crate::unzip;
use crate::url::{ResolvedTarget, TargetBuilder, explicit_url};

/// Client for one SDMX service.
///
/// The service agency, fixed at construction, supplies the base URL of every
/// request built from the registry. Calls run one stage at a time; the
/// response cache is owned by the client, so [`SdmxClient::get`] takes
/// `&mut self`.
pub struct SdmxClient<T, R: MessageReader> {
    agency: String,
    registry: AgencyRegistry,
    transport: T,
    reader: R,
    structures: Option<Arc<dyn StructureLookup>>,
    cache: ResponseCache<R::Message>,
}

impl<R: MessageReader> SdmxClient<HttpTransport, R> {
    /// Creates a client using the HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the agency is unknown or the HTTP client cannot be built.
    pub fn with_http(
        agency: impl Into<String>,
        registry: AgencyRegistry,
        config: ClientConfig,
        reader: R,
    ) -> Result<Self> {
        let transport =
            HttpTransport::new(config).map_err(|e| SdmxError::Transport(e.to_string()))?;
        Self::new(agency, registry, transport, reader)
    }
}

impl<T: Transport, R: MessageReader> SdmxClient<T, R> {
    /// Creates a client for the service of `agency`.
    ///
    /// Pass `""` for a client that only reads local files or full URLs.
    ///
    /// # Errors
    ///
    /// Returns [`SdmxError::UnknownAgency`] if `agency` is not registered.
    pub fn new(
        agency: impl Into<String>,
        registry: AgencyRegistry,
        transport: T,
        reader: R,
    ) -> Result<Self> {
        let agency = agency.into();
        registry.lookup(&agency)?;
        Ok(Self {
            agency,
            registry,
            transport,
            reader,
            structures: None,
            cache: ResponseCache::new(),
        })
    }

    /// Sets the structure lookup used to resolve structured keys.
    #[must_use]
    pub fn with_structures(mut self, lookup: impl StructureLookup + 'static) -> Self {
        self.structures = Some(Arc::new(lookup));
        self
    }

    /// Returns the service agency code.
    #[must_use]
    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Returns the agency registry.
    #[must_use]
    pub const fn registry(&self) -> &AgencyRegistry {
        &self.registry
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the response cache.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache<R::Message> {
        &self.cache
    }

    /// Retrieves the resource described by `request`.
    ///
    /// A cached response for the request's token is returned without any
    /// network activity. If the message footer points at a URL and footer
    /// polling is enabled, that URL is fetched instead; when every attempt
    /// fails the result is [`Outcome::RedirectExhausted`].
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be resolved, the transport
    /// fails, the container cannot be opened, or the reader rejects the message.
    pub async fn get(&mut self, request: Request) -> Result<Outcome<R::Message>> {
        if let Some(token) = request.cache_token.as_deref()
            && let Some(hit) = self.cache.get(token)
        {
            tracing::debug!(token, "Cache hit");
            return Ok(Outcome::Complete(hit));
        }

        let target = self.resolve(&request).await?;
        let source_file = request.source_file.as_deref();
        let dest_file = request.dest_file.as_deref();
        let writer = request.writer.clone();

        let response = self
            .retrieve(&target, source_file, dest_file, writer.clone())
            .await?;

        let trailer = response
            .message
            .footer()
            .filter(|_| request.footer_retry.is_enabled())
            .cloned();

        let outcome = match trailer {
            None => Outcome::Complete(Arc::new(response)),
            Some(trailer) => {
                tracing::info!("Footer found in SDMX message");
                let this: &Self = self;
                let headers = target.headers.clone();
                let redirect = footer::follow(&trailer, request.footer_retry, move |url| {
                    let redirected = ResolvedTarget {
                        url,
                        params: Default::default(),
                        headers: headers.clone(),
                    };
                    let writer = writer.clone();
                    async move { this.retrieve(&redirected, None, dest_file, writer).await }
                })
                .await;

                match redirect {
                    Redirect::NotRedirected => Outcome::Complete(Arc::new(response)),
                    Redirect::Resolved(redirected) => Outcome::Complete(Arc::new(redirected)),
                    Redirect::Exhausted { url, attempts } => Outcome::RedirectExhausted {
                        url,
                        attempts,
                        placeholder: response,
                    },
                }
            }
        };

        if let (Some(token), Outcome::Complete(response)) = (request.cache_token, &outcome)
            && response.is_ok()
        {
            tracing::debug!(%token, "Caching response");
            self.cache.put(token, Arc::clone(response));
        }

        Ok(outcome)
    }

    /// Resolves the request target, translating a structured key first.
    async fn resolve(&self, request: &Request) -> Result<ResolvedTarget> {
        let builder = TargetBuilder::new(&self.registry, &self.agency);

        if explicit_url(request).is_some() || request.source_file.is_some() {
            return builder.build(request, "");
        }

        let key = match &request.key {
            Key::Raw(raw) => raw.clone(),
            Key::Dimensions(dims) if dims.is_empty() => String::new(),
            Key::Dimensions(dims) => match request.resource_type {
                Some(ResourceType::Data) => {
                    key::resolve(&request.resource_id, dims, self.structures.as_deref()).await?
                }
                Some(other) => return Err(SdmxError::UnsupportedKey(other.to_string())),
                None => return Err(SdmxError::InvalidResourceType(String::new())),
            },
        };

        builder.build(request, &key)
    }

    /// Fetches, unwraps and reads one message.
    async fn retrieve(
        &self,
        target: &ResolvedTarget,
        source_file: Option<&Path>,
        dest_file: Option<&Path>,
        writer: Option<Writer>,
    ) -> Result<Response<R::Message>> {
        match source_file {
            Some(path) if target.url.is_empty() => {
                tracing::info!(file = %path.display(), "Requesting resource from file");
            }
            _ => tracing::info!(url = %target.url, params = ?target.params, "Requesting resource"),
        }

        let RawPayload {
            body,
            url,
            headers,
            status,
        } = self
            .transport
            .fetch(target, source_file)
            .await
            .map_err(|e| SdmxError::Transport(e.to_string()))?;
        tracing::info!(%url, bytes = body.len(), ?status, "Loaded resource");

        if let Some(dest) = dest_file {
            tracing::info!(file = %dest.display(), "Writing raw message");
            tokio::fs::write(dest, &body).await?;
        }

        let message = unzip::read_unwrapped(Cursor::new(body), |source| self.reader.read(source))
            .map_err(|e| SdmxError::Container(e.to_string()))?
            .map_err(|e| SdmxError::Parse(e.to_string()))?;

        Ok(Response::new(message, url, headers, status, writer))
    }
}

impl<T: std::fmt::Debug, R: MessageReader + std::fmt::Debug> std::fmt::Debug for SdmxClient<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdmxClient")
            .field("agency", &self.agency)
            .field("transport", &self.transport)
            .field("reader", &self.reader)
            .field("structures", &self.structures.is_some())
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
