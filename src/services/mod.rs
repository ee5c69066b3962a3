pub mod auth;
pub mod catalog;
pub mod courses;
pub mod planner;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use courses::CourseService;
pub use planner::PlannerService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{PlannerError, Result};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 从 app data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| PlannerError::database_config("Storage not found in app data"))
}

/// 当前登录用户，须在 RequireJWT 保护的路由中调用
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        PlannerError::authentication("Authentication credentials were not provided.")
    })
}
