/*
 * lakeFS API client - request building, content negotiation and dispatch
 * for the lakeFS object-storage/versioning service
 */

// Internal modules
mod client;
pub mod models;  // Make models public
mod apis;
mod error;
mod auth;
mod blocking;
mod configuration;
pub mod negotiate;
pub mod operation;
mod request;
mod response;

// Re-export public types and interfaces
pub use client::{CallHandle, LakeFsClient};
pub use models::*;
pub use apis::*;
pub use error::{ErrorKind, LakeFsError, LakeFsResult};
pub use auth::{AuthScheme, Authentication, BasicAuth, BearerAuth, CookieAuth, Credentials, NoAuth};
pub use blocking::BlockingClient;
pub use configuration::{Configuration, DEFAULT_BASE_PATH};
pub use operation::{BodySpec, Operation, ParamLocation, ParamSpec};
pub use request::{build, Params, RequestBody, RequestDescriptor};
pub use response::ApiResponse;

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        LakeFsClient, BlockingClient, CallHandle,
        BasicAuth, BearerAuth, CookieAuth, Credentials, NoAuth,
        LakeFsError, LakeFsResult, ErrorKind,
        Configuration, Params, ApiResponse,
        // Common model types
        Config, Setup, CredentialsWithSecret,
        Ref, RefList, TagCreation,
    };
}
