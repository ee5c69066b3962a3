use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{FieldErrors, PlannerError};
use crate::models::auth::{requests::RegisterRequest, responses::TokenPairResponse};
use crate::models::users::entities::NewUser;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 校验字段
    let registration = register_request.validate().map_err(PlannerError::from)?;

    // 2. 用户名已被占用
    if storage
        .get_user_by_username(&registration.username)
        .await?
        .is_some()
    {
        return Err(
            FieldErrors::single("username", "A user with that username already exists.").into(),
        );
    }

    // 3. 哈希密码后在一个事务内创建用户与资料
    let password_hash = hash_password(&registration.password)?;
    let user = storage
        .create_user_with_profile(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
            program_level: registration.program_level,
            program: registration.program,
            year_intake: registration.year_intake,
        })
        .await?;

    // 4. 签发令牌对
    let pair = JwtUtils::generate_token_pair(user.id).map_err(PlannerError::from)?;

    tracing::info!("User {} registered", user.username);

    Ok(HttpResponse::Created().json(TokenPairResponse {
        access: pair.access_token,
        refresh: pair.refresh_token,
    }))
}
