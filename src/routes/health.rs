use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::HealthResponse;

pub async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse::ok()))
}

// 配置路由（各业务区域的别名在各自的 scope 中注册）
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health/", web::get().to(health_check))
        .route("/api/catalog/health/", web::get().to(health_check));
}
