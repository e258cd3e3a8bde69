use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn current_principal(
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
) -> Result<ApiSuccess<PrincipalResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        PrincipalResponseData {
            username: principal.username().to_string(),
            roles: principal
                .roles()
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalResponseData {
    pub username: String,
    pub roles: Vec<String>,
}
