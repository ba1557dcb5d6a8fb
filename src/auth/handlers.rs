use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser},
        jwt::JwtKeys,
    },
    error::AppResult,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Exact match against the configured account; no hashing involved.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = &state.config.account;

    if payload.username != account.username || payload.password != account.password {
        warn!("login rejected");
        return Ok(Json(LoginResponse {
            success: false,
            message: "Invalid credentials".into(),
            user: None,
            token: None,
        }));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(account.user_id, &account.username)?;

    info!(user_id = %account.user_id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: Some(PublicUser {
            id: account.user_id,
            username: account.username.clone(),
        }),
        token: Some(token),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_with_configured_account_issues_token() {
        let state = AppState::fake();
        let account = state.config.account.clone();
        let Json(res) = login(
            State(state.clone()),
            AppJson(LoginRequest { username: account.username.clone(), password: account.password.clone() }),
        )
        .await
        .unwrap();

        assert!(res.success);
        assert_eq!(res.user.as_ref().unwrap().id, account.user_id);
        let claims = JwtKeys::from_ref(&state).verify(res.token.as_deref().unwrap()).unwrap();
        assert_eq!(claims.sub, account.user_id);
    }

    #[tokio::test]
    async fn wrong_password_is_reported_without_error() {
        let state = AppState::fake();
        let username = state.config.account.username.clone();
        let Json(res) = login(
            State(state),
            AppJson(LoginRequest { username, password: "wrong".into() }),
        )
        .await
        .unwrap();

        assert!(!res.success);
        assert!(res.user.is_none());
        assert!(res.token.is_none());
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("token").is_none());
    }
}
