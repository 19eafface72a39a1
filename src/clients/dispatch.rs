//! The request dispatcher seam.
//!
//! Resource operations never talk to [`HttpClient`] directly; they go
//! through the [`Dispatch`] trait so that any transport (or a test double)
//! can be plugged in.

use serde_json::json;

use crate::clients::errors::ApiError;
use crate::clients::http_client::{HttpClient, API_VERSION_HEADER, SECRET_KEY_HEADER};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::rest::{Params, RequestOptions, ResolvedOptions};

/// Sends one request and returns the raw response with the options that
/// were in effect.
///
/// Implementations attempt the request exactly once and report failures as
/// [`ApiError`].
///
/// # Example
///
/// ```rust,ignore
/// use safepay_api::clients::{Dispatch, HttpMethod};
///
/// let (response, options) = client
///     .dispatch(HttpMethod::Get, "customers/cus_1/cards", None, None)
///     .await?;
/// println!("status {}", response.code);
/// ```
#[allow(async_fn_in_trait)]
pub trait Dispatch: Send + Sync {
    /// Dispatches a request.
    ///
    /// `url` is relative to the API base. `params` go in the query string
    /// for `GET` and `DELETE` and in the JSON body for `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for network failures, non-2xx responses and
    /// undecodable bodies.
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<Params>,
        options: Option<&RequestOptions>,
    ) -> Result<(HttpResponse, ResolvedOptions), ApiError>;
}

impl Dispatch for HttpClient {
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        params: Option<Params>,
        options: Option<&RequestOptions>,
    ) -> Result<(HttpResponse, ResolvedOptions), ApiError> {
        let resolved = ResolvedOptions::parse(options);
        let request = build_request(method, url, params, &resolved)?;
        let response = self.request(request).await?;
        Ok((response, resolved))
    }
}

/// Translates a dispatch call into an [`HttpRequest`].
fn build_request(
    method: HttpMethod,
    url: &str,
    params: Option<Params>,
    options: &ResolvedOptions,
) -> Result<HttpRequest, ApiError> {
    let mut builder = HttpRequest::builder(method, url);

    if method.uses_query() {
        if let Some(params) = params {
            let query = params.to_query();
            if !query.is_empty() {
                builder = builder.query(query);
            }
        }
    } else {
        builder = builder.body(params.map_or_else(|| json!({}), Params::into_value));
    }

    for (name, value) in &options.headers {
        builder = builder.header(name.clone(), value.clone());
    }

    if let Some(key) = &options.api_key {
        tracing::debug!("Using per-request secret key override");
        builder = builder.header(SECRET_KEY_HEADER, key.as_ref());
    }

    if let Some(version) = &options.api_version {
        builder = builder.header(API_VERSION_HEADER, version.as_ref());
    }

    if let Some(base) = &options.api_base {
        tracing::debug!(api_base = %base.as_ref(), "Using per-request API base override");
        builder = builder.api_base(base.as_ref());
    }

    Ok(builder.build()?)
}
