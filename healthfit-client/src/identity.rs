use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{send, Error, Result};

/// The subject a bearer token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

#[mockall::automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token. A rejected token is reported as [`Error::RequestError`].
    async fn get_user(&self, token: &str) -> Result<Identity>;
}

/// Supabase Auth: `GET {url}/auth/v1/user` with the project's anon key.
pub struct SupabaseIdentityProvider {
    url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl SupabaseIdentityProvider {
    fn new(url: String, anon_key: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            anon_key,
            client: reqwest::Client::new(),
        }
    }
}

pub fn create(url: String, anon_key: String) -> impl IdentityProvider {
    SupabaseIdentityProvider::new(url, anon_key)
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn get_user(&self, token: &str) -> Result<Identity> {
        debug!("Resolving bearer token with identity provider");
        send(
            self.client
                .get(format!("{}/auth/v1/user", self.url))
                .header("apikey", &self.anon_key)
                .bearer_auth(token),
        )
        .await?
        .json()
        .await
        .map_err(|_| Error::ResponseError)
    }
}
