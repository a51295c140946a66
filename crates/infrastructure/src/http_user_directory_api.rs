//! reqwest adapter for the remote user directory.

use async_trait::async_trait;
use roster_application::UserDirectoryApi;
use roster_core::{AppError, AppResult};
use roster_domain::{EditableFields, UserId, UserRecord};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::ApiBaseUrl;

#[derive(Debug, Deserialize)]
struct UserListResponse {
    #[serde(default)]
    users: Vec<serde_json::Value>,
}

/// HTTP implementation of [`UserDirectoryApi`].
#[derive(Clone)]
pub struct HttpUserDirectoryApi {
    http_client: reqwest::Client,
    base_url: ApiBaseUrl,
}

impl HttpUserDirectoryApi {
    /// Creates an adapter calling endpoints below `base_url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: ApiBaseUrl) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    async fn send(
        &self,
        endpoint: &Url,
        request: reqwest::RequestBuilder,
    ) -> AppResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|error| AppError::Transport(format!("failed to call {endpoint}: {error}")))?;

        let status = response.status();
        debug!(endpoint = %endpoint, status = status.as_u16(), "directory backend responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_owned());
        let message = format!("{endpoint} returned status {}: {body}", status.as_u16());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }

        Err(AppError::Transport(message))
    }
}

#[async_trait]
impl UserDirectoryApi for HttpUserDirectoryApi {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        let endpoint = self.base_url.endpoint(&["allusers"])?;
        let response = self
            .send(&endpoint, self.http_client.get(endpoint.clone()))
            .await?;

        let body = response
            .json::<UserListResponse>()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to parse {endpoint} response body: {error}"))
            })?;

        let mut users = Vec::with_capacity(body.users.len());
        for (index, row) in body.users.into_iter().enumerate() {
            match serde_json::from_value::<UserRecord>(row) {
                Ok(user) => users.push(user),
                Err(error) => {
                    warn!(
                        endpoint = %endpoint,
                        index,
                        error = %error,
                        "skipping undecodable user row"
                    );
                }
            }
        }

        Ok(users)
    }

    async fn delete_user(&self, user_id: &UserId) -> AppResult<()> {
        let endpoint = self.base_url.endpoint(&["deleteuser", user_id.as_str()])?;
        self.send(&endpoint, self.http_client.delete(endpoint.clone()))
            .await?;

        Ok(())
    }

    async fn update_user(&self, user_id: &UserId, fields: &EditableFields) -> AppResult<()> {
        let endpoint = self.base_url.endpoint(&["updateuser", user_id.as_str()])?;
        self.send(&endpoint, self.http_client.put(endpoint.clone()).json(fields))
            .await?;

        Ok(())
    }
}
