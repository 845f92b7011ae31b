pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod store;

pub use crate::error::BilledApiError;
pub use crate::store::BillStore;
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    /// Build a client for the store at `base_url`.
    ///
    /// The token is the session JWT; the store accepts anonymous reads in
    /// local setups, so it is optional.
    pub fn new(base_url: &str, token: Option<&SecretString>) -> Self {
        let inner = ApiClient::new(base_url);
        let inner = match token {
            Some(token) => inner.bearer_auth(token.expose_secret()),
            None => inner,
        };
        Self { inner }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, BilledApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn bills() -> BillRepository {
        BillRepository::new()
    }
}
