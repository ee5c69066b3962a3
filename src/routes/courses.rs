use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reviews::requests::ReviewSubmitRequest;
use crate::routes::health::health_check;
use crate::services::CourseService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn get_course_detail(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course_detail(&req, course_id.0).await
}

pub async fn list_reviews(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_reviews(&req, course_id.0).await
}

pub async fn submit_review(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    review_data: web::Json<ReviewSubmitRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .submit_review(&req, course_id.0, review_data.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .route("/", web::get().to(list_courses))
            .route("/health/", web::get().to(health_check))
            .route("/{course_id}/", web::get().to(get_course_detail))
            .service(
                web::resource("/{course_id}/reviews/")
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(list_reviews))
                    .route(web::post().to(submit_review)),
            ),
    );
}
