//! Request helper extensions.

use async_trait::async_trait;
use salvo::Request;
use serde::de::DeserializeOwned;

use crate::web::WebError;

pub(crate) trait RequestExt {
    /// The `{id}` path segment. Empty when the route has none, which then
    /// fails identity parsing downstream.
    fn id_param(&self) -> String;
}

impl RequestExt for Request {
    fn id_param(&self) -> String {
        self.param::<String>("id").unwrap_or_default()
    }
}

/// JSON body decoding that reports failures as 400s.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
#[async_trait]
pub(crate) trait JsonBodyExt {
    async fn json_body<T>(&mut self) -> Result<T, WebError>
    where
        T: DeserializeOwned + Send;
}

#[async_trait]
impl JsonBodyExt for Request {
    async fn json_body<T>(&mut self) -> Result<T, WebError>
    where
        T: DeserializeOwned + Send,
    {
        let payload = self.payload().await.map_err(WebError::decode)?;

        serde_json::from_slice(payload).map_err(WebError::decode)
    }
}
