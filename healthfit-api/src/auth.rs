use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use healthfit_client::{Error as ClientError, Identity};
use healthfit_db::Result as DbResult;
use healthfit_model::user::{User, AUTO_CREATED_NAME};
use log::{error, info};

use crate::{error::ApiError, state::AppState};

/// The caller, as resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token.ok_or(ApiError::Unauthorized("Unauthorized: No token provided"))?;
            let state = state.ok_or(ApiError::Internal("Internal Server Error during auth"))?;

            match state.identity.get_user(&token).await {
                Ok(identity) => Ok(AuthenticatedUser(identity)),
                Err(ClientError::RequestError) => {
                    Err(ApiError::Unauthorized("Unauthorized: Invalid token"))
                }
                Err(e) => {
                    error!("Identity provider failed: {}", e);
                    Err(ApiError::Internal("Internal Server Error during auth"))
                }
            }
        })
    }
}

impl AuthenticatedUser {
    pub fn auth_id(&self) -> &str {
        &self.0.id
    }

    /// Looks up the caller's profile, creating a pending one when the token carries an email.
    pub async fn find_or_create(&self, state: &AppState) -> DbResult<Option<User>> {
        if let Some(user) = state.users.find_by_auth_id(self.auth_id()).await? {
            return Ok(Some(user));
        }

        let Some(email) = &self.0.email else {
            return Ok(None);
        };

        info!("Auto-creating user for {}", self.auth_id());
        let user = User::new(
            self.auth_id().to_owned(),
            email.clone(),
            AUTO_CREATED_NAME.to_owned(),
        );
        state.users.save(&user).await?;

        // A concurrent request may have created the row first; the upsert keeps its id.
        let stored = state.users.find_by_auth_id(self.auth_id()).await?;
        Ok(stored.or(Some(user)))
    }
}
