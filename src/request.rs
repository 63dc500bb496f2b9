//! Turning an [`Operation`] and caller-supplied [`Params`] into a
//! [`RequestDescriptor`].
//!
//! Building is pure: nothing here touches the network, so every usage error
//! surfaces before a request is sent.

use crate::{
    auth::{merge_cookie, AuthScheme},
    error::{LakeFsError, LakeFsResult},
    negotiate::{is_form_mime, is_json_mime, select_accept, select_content_type},
    operation::{BodySpec, Operation, ParamLocation},
};
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

/// Caller-supplied values for one call
///
/// Every list keeps insertion order; repeated names are kept, not collapsed.
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: Vec<(String, String)>,
    query: Vec<(String, String)>,
    header: Vec<(String, String)>,
    cookie: Vec<(String, String)>,
    form: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path.push((name.into(), value.to_string()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.header.push((name.into(), value.to_string()));
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.cookie.push((name.into(), value.to_string()));
        self
    }

    pub fn form(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.form.push((name.into(), value.to_string()));
        self
    }

    /// Attach a JSON request body
    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> LakeFsResult<Self> {
        let value = serde_json::to_value(body).map_err(LakeFsError::Serialization)?;
        self.body = Some(value);
        Ok(self)
    }

    fn has(&self, location: ParamLocation, name: &str) -> bool {
        let list = match location {
            ParamLocation::Path => &self.path,
            ParamLocation::Query => &self.query,
            ParamLocation::Header => &self.header,
            ParamLocation::Cookie => &self.cookie,
            ParamLocation::Form => &self.form,
        };
        list.iter().any(|(n, _)| n == name)
    }
}

/// Request body ready to send
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// Fully-formed request, ready for dispatch
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub operation: &'static str,
    pub method: Method,
    /// Path with placeholders substituted and percent-encoded
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Accept, Content-Type, caller headers and caller cookies
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    pub auth: &'static [AuthScheme],
}

/// Substitute `{name}` placeholders by exact name match.
fn resolve_path(op: &Operation, values: &[(String, String)]) -> LakeFsResult<String> {
    let mut resolved = String::with_capacity(op.path.len());
    let mut rest = op.path;

    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|i| start + i)
            .ok_or_else(|| LakeFsError::invalid_param(format!("Malformed path template: {}", op.path)))?;
        let name = &rest[start + 1..end];
        let value = values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| LakeFsError::missing_param(op.id, name))?;

        resolved.push_str(&rest[..start]);
        resolved.push_str(&urlencoding::encode(value));
        rest = &rest[end + 1..];
    }
    resolved.push_str(rest);

    Ok(resolved)
}

fn caller_header(name: &str, value: &str) -> LakeFsResult<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| LakeFsError::invalid_param(format!("Invalid header name '{}': {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| LakeFsError::invalid_param(format!("Invalid value for header '{}': {}", name, e)))?;
    Ok((header_name, header_value))
}

fn header_text(value: &str) -> LakeFsResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| LakeFsError::invalid_param(format!("Invalid media type '{}': {}", value, e)))
}

/// Pick the carrier matching the negotiated content type. The other carrier
/// is dropped; a content type that fits neither rejects any supplied body.
fn request_body(
    op: &Operation,
    content_type: &str,
    json: Option<serde_json::Value>,
    form: Vec<(String, String)>,
) -> LakeFsResult<Option<RequestBody>> {
    if is_form_mime(content_type) {
        if json.is_some() {
            debug!("{} sends {}, dropping the JSON body", op.id, content_type);
        }
        Ok((!form.is_empty()).then_some(RequestBody::Form(form)))
    } else if is_json_mime(content_type) {
        if !form.is_empty() {
            debug!("{} sends {}, dropping the form fields", op.id, content_type);
        }
        Ok(json.map(RequestBody::Json))
    } else if json.is_some() || !form.is_empty() {
        Err(LakeFsError::invalid_param(format!(
            "{} sends {}, which cannot carry a JSON or form body",
            op.id, content_type
        )))
    } else {
        Ok(None)
    }
}

/// Build the request for `op` from the caller's parameters
pub fn build(op: &Operation, params: Params) -> LakeFsResult<RequestDescriptor> {
    for param in op.params.iter().filter(|p| p.required) {
        if !params.has(param.location, param.name) {
            return Err(LakeFsError::missing_param(op.id, param.name));
        }
    }

    let content_type = op
        .takes_body()
        .then(|| select_content_type(op.content_types));
    let body = match &content_type {
        Some(content_type) => request_body(op, content_type, params.body, params.form)?,
        None => {
            if params.body.is_some() || !params.form.is_empty() {
                debug!("{} takes no request body, dropping the supplied one", op.id);
            }
            None
        }
    };
    if op.body == BodySpec::Required && body.is_none() {
        return Err(LakeFsError::missing_param(op.id, op.body_name));
    }

    let path = resolve_path(op, &params.path)?;

    let mut headers = HeaderMap::new();
    if let Some(accept) = select_accept(op.accepts) {
        headers.insert(ACCEPT, header_text(&accept)?);
    }
    for (name, value) in &params.header {
        let (name, value) = caller_header(name, value)?;
        headers.append(name, value);
    }
    for (name, value) in &params.cookie {
        merge_cookie(&mut headers, name, value)?;
    }
    if let (Some(content_type), Some(_)) = (&content_type, &body) {
        headers.insert(CONTENT_TYPE, header_text(content_type)?);
    }

    Ok(RequestDescriptor {
        operation: op.id,
        method: op.method.clone(),
        path,
        query: params.query,
        headers,
        body,
        auth: op.auth,
    })
}
