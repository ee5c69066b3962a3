use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::PlannerError;
use crate::models::auth::{requests::UpdateProfileRequest, responses::MeResponse};
use crate::services::current_user;

use super::AuthService;

pub async fn handle_get_me(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 资料不存在时返回 null
    let profile = storage.get_profile(user.id).await?;

    Ok(HttpResponse::Ok().json(MeResponse {
        username: user.username,
        email: user.email,
        profile,
    }))
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let changes = update_request.validate().map_err(PlannerError::from)?;

    match storage.update_profile(user.id, changes).await? {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(PlannerError::not_found("Profile not found").into()),
    }
}
