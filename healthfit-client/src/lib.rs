pub mod completion;
pub mod identity;

pub use completion::{CompletionProvider, MockCompletionProvider};
pub use identity::{Identity, IdentityProvider, MockIdentityProvider};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
}

type Result<T> = std::result::Result<T, Error>;

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    request
        .send()
        .await
        .map_err(|_| Error::CommunicationError)
        .and_then(|resp| {
            if resp.status().is_client_error() {
                Err(Error::RequestError)
            } else if resp.status().is_server_error() {
                Err(Error::InternalServerError)
            } else {
                Ok(resp)
            }
        })
}
