use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{FieldErrors, PlannerError};
use crate::models::auth::requests::{TokenObtainRequest, TokenRefreshRequest};
use crate::models::auth::responses::{AccessTokenResponse, TokenPairResponse};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::REQUIRED;

use super::AuthService;

const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

pub async fn handle_obtain_token(
    service: &AuthService,
    token_request: TokenObtainRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (username, password) = token_request.validate().map_err(PlannerError::from)?;

    // 1. 校验用户名与密码
    let Some((user, password_hash)) = storage.get_user_credentials(&username).await? else {
        return Err(PlannerError::authentication(BAD_CREDENTIALS).into());
    };
    if !verify_password(&password, &password_hash) {
        tracing::info!("Failed login attempt for {}", username);
        return Err(PlannerError::authentication(BAD_CREDENTIALS).into());
    }

    // 2. 更新最后登录时间，失败不影响登录
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last_login for {}: {}", user.username, e);
    }

    // 3. 生成令牌对
    let pair = JwtUtils::generate_token_pair(user.id).map_err(PlannerError::from)?;
    tracing::info!("User {} logged in successfully", user.username);

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access: pair.access_token,
        refresh: pair.refresh_token,
    }))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: TokenRefreshRequest,
) -> ActixResult<HttpResponse> {
    let refresh = refresh_request
        .refresh
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| FieldErrors::single("refresh", REQUIRED))?;

    match JwtUtils::refresh_access_token(&refresh) {
        Ok(access) => {
            tracing::debug!(
                "Access token refreshed, valid for {} minutes",
                service.get_config().jwt.access_token_expiry
            );
            Ok(HttpResponse::Ok().json(AccessTokenResponse { access }))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Err(PlannerError::token("Token is invalid or expired").into())
        }
    }
}
