use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::programs::requests::ProgramSearchParams;
use crate::services::CatalogService;

// 懒加载的全局 CatalogService 实例
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_assessment_types() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_assessment_types().await
}

pub async fn list_study_areas() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_study_areas().await
}

pub async fn list_program_levels() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_program_levels().await
}

pub async fn search_programs(
    req: HttpRequest,
    query: web::Query<ProgramSearchParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .search_programs(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/assessment-types/", web::get().to(list_assessment_types))
        .route("/api/study-areas/", web::get().to(list_study_areas))
        .route("/api/program-levels/", web::get().to(list_program_levels))
        .route("/api/programs/", web::get().to(search_programs));
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::models::common::choices::ProgramLevel;
    use crate::routes::test_support::{self, test_app};

    #[actix_web::test]
    async fn test_static_choices() {
        let (_, data) = test_support::storage().await;
        let app = test_app!(data);

        let req = test::TestRequest::get()
            .uri("/api/program-levels/")
            .to_request();
        let levels: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            levels,
            json!([
                {"value": "UNDERGRAD", "label": "Undergraduate"},
                {"value": "POSTGRAD", "label": "Postgraduate"}
            ])
        );

        let req = test::TestRequest::get()
            .uri("/api/assessment-types/")
            .to_request();
        let types: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(types.as_array().map(Vec::len), Some(4));

        let req = test::TestRequest::get().uri("/api/study-areas/").to_request();
        let areas: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(areas[0]["value"], "BEL");
    }

    #[actix_web::test]
    async fn test_program_search() {
        let (storage, data) = test_support::storage().await;
        for (name, level) in [
            ("Bachelor of Engineering (Honours)", ProgramLevel::Undergrad),
            ("Master of Engineering", ProgramLevel::Postgrad),
            ("Bachelor of Arts", ProgramLevel::Undergrad),
        ] {
            storage.get_or_create_program_impl(name, level).await.unwrap();
        }
        let app = test_app!(data);

        let req = test::TestRequest::get()
            .uri("/api/programs/?level=UNDERGRAD&search=engineer")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["name"], "Bachelor of Engineering (Honours)");
        assert_eq!(body[0]["level"], "UNDERGRAD");
        assert_eq!(body[0]["level_label"], "Undergraduate");

        let req = test::TestRequest::get()
            .uri("/api/programs/?level=unknown&search=%20%20")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[0]["name"], "Bachelor of Arts");
    }
}
