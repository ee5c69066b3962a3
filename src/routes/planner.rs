use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::planner::requests::{PlannedCourseRequest, RemovePlannedCourseRequest};
use crate::routes::health::health_check;
use crate::services::PlannerService;

// 懒加载的全局 PlannerService 实例
static PLANNER_SERVICE: Lazy<PlannerService> = Lazy::new(PlannerService::new_lazy);

pub async fn list_semesters(req: HttpRequest) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE.list_semesters(&req).await
}

pub async fn add_semester(req: HttpRequest) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE.add_semester(&req).await
}

pub async fn remove_latest_semester(req: HttpRequest) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE.remove_latest_semester(&req).await
}

pub async fn list_planned_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE.list_planned_courses(&req).await
}

pub async fn upsert_planned_course(
    req: HttpRequest,
    planned_data: web::Json<PlannedCourseRequest>,
) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE
        .upsert_planned_course(&req, planned_data.into_inner())
        .await
}

pub async fn reassign_semester(
    req: HttpRequest,
    planned_data: web::Json<PlannedCourseRequest>,
) -> ActixResult<HttpResponse> {
    PLANNER_SERVICE
        .reassign_semester(&req, planned_data.into_inner())
        .await
}

// DELETE 请求体可以为空，缺失的 course_id 由服务层报告
pub async fn remove_planned_course(
    req: HttpRequest,
    remove_data: Option<web::Json<RemovePlannedCourseRequest>>,
) -> ActixResult<HttpResponse> {
    let remove_request = remove_data.map(web::Json::into_inner).unwrap_or_default();
    PLANNER_SERVICE
        .remove_planned_course(&req, remove_request)
        .await
}

// 配置路由
pub fn configure_planner_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/planned-courses")
            .route("/health/", web::get().to(health_check))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("/")
                            .route(web::get().to(list_planned_courses))
                            .route(web::post().to(upsert_planned_course))
                            .route(web::patch().to(reassign_semester))
                            .route(web::delete().to(remove_planned_course)),
                    )
                    .service(
                        web::resource("/semesters/")
                            .route(web::get().to(list_semesters))
                            .route(web::post().to(add_semester))
                            .route(web::delete().to(remove_latest_semester)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::routes::test_support::{self, bearer, test_app};
    use crate::utils::jwt::JwtUtils;

    fn numbers(semesters: &Value) -> Vec<i64> {
        semesters
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["semester_number"].as_i64().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn test_semester_lifecycle() {
        let (storage, data) = test_support::storage().await;
        let user = storage.test_user("sam").await;
        let course = storage.test_course("COMP1100").await;
        let token = JwtUtils::generate_access_token(user.id).unwrap();
        let app = test_app!(data);

        // 首次访问自动创建 1..=4
        let req = test::TestRequest::get()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        let semesters: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(numbers(&semesters), vec![1, 2, 3, 4]);

        let req = test::TestRequest::post()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["semester_number"], 5);

        // 最新学期有课程时拒绝删除
        let req = test::TestRequest::post()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": course.id, "semester": 5}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(
            err["message"],
            "Cannot delete semester with courses. Remove all courses first."
        );

        // 移走课程后可以删除
        let req = test::TestRequest::patch()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": course.id, "semester": 2}))
            .to_request();
        let moved: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(moved["semester"], 2);

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        let semesters: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(numbers(&semesters), vec![1, 2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_planned_course_crud() {
        let (storage, data) = test_support::storage().await;
        let user = storage.test_user("tess").await;
        let course = storage.test_course("CSSE1001").await;
        let token = JwtUtils::generate_access_token(user.id).unwrap();
        let app = test_app!(data);

        for semester in [1, 3] {
            let req = test::TestRequest::post()
                .uri("/api/planned-courses/")
                .insert_header(bearer(&token))
                .set_json(json!({"course_id": course.id, "semester": semester}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .to_request();
        let planned: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(planned.as_array().map(Vec::len), Some(1));
        assert_eq!(planned[0]["course_code"], "CSSE1001");
        assert_eq!(planned[0]["semester"], 3);

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": course.id}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": course.id}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_planned_course_validation() {
        let (storage, data) = test_support::storage().await;
        let user = storage.test_user("uma").await;
        let token = JwtUtils::generate_access_token(user.id).unwrap();
        let app = test_app!(data);

        let req = test::TestRequest::post()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": 424242, "semester": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(
            err["data"]["course_id"][0],
            "Invalid pk \"424242\" - object does not exist."
        );

        let req = test::TestRequest::post()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": 1, "semester": 0}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": 1, "semester": 2147483647}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert!(err["data"]["semester"].is_array());

        let req = test::TestRequest::patch()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .set_json(json!({"course_id": 1, "semester": 2}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["data"]["course_id"][0], "This field is required.");

        let req = test::TestRequest::delete()
            .uri("/api/planned-courses/semesters/")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_planner_requires_token() {
        let (_, data) = test_support::storage().await;
        let app = test_app!(data);

        let req = test::TestRequest::get()
            .uri("/api/planned-courses/")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
