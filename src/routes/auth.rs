use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{
    RegisterRequest, TokenObtainRequest, TokenRefreshRequest, UpdateProfileRequest,
};
use crate::routes::health::health_check;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn obtain_token(
    req: HttpRequest,
    credentials: web::Json<TokenObtainRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.obtain_token(credentials.into_inner(), &req).await
}

pub async fn refresh_token(refresh: web::Json<TokenRefreshRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(refresh.into_inner()).await
}

pub async fn get_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_me(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    profile_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(profile_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/health/", web::get().to(health_check))
            .route("/register/", web::post().to(register))
            .route("/token/", web::post().to(obtain_token))
            .route("/token/refresh/", web::post().to(refresh_token))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me/", web::get().to(get_me))
                    .route("/profile/", web::patch().to(update_profile)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::routes::test_support::{self, bearer, test_app};

    fn alice() -> Value {
        json!({
            "username": "alice",
            "email": "a@x.io",
            "password": "Str0ngPass!",
            "program_level": "UNDERGRAD",
            "program": "BCompSc",
            "year_intake": "SEM1"
        })
    }

    #[actix_web::test]
    async fn test_register_then_me() {
        let (_, storage) = test_support::storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/auth/register/")
            .set_json(alice())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let tokens: Value = test::read_body_json(resp).await;
        let access = tokens["access"].as_str().unwrap().to_string();
        assert!(tokens["refresh"].is_string());

        let req = test::TestRequest::get()
            .uri("/api/auth/me/")
            .insert_header(bearer(&access))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let me: Value = test::read_body_json(resp).await;
        assert_eq!(
            me,
            json!({
                "username": "alice",
                "email": "a@x.io",
                "profile": {
                    "program_level": "UNDERGRAD",
                    "program": "BCompSc",
                    "year_intake": "SEM1"
                }
            })
        );
    }

    #[actix_web::test]
    async fn test_register_reports_field_errors() {
        let (_, storage) = test_support::storage().await;
        let app = test_app!(storage);

        let mut body = alice();
        body["password"] = json!("short");
        body["program_level"] = json!("DOCTORATE");
        let req = test::TestRequest::post()
            .uri("/api/auth/register/")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert!(err["data"]["password"].is_array());
        assert!(err["data"]["program_level"].is_array());
    }

    #[actix_web::test]
    async fn test_register_duplicate_username() {
        let (_, storage) = test_support::storage().await;
        let app = test_app!(storage);

        for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/api/auth/register/")
                .set_json(alice())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_token_obtain_and_refresh() {
        let (_, storage) = test_support::storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/auth/register/")
            .set_json(alice())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/token/")
            .set_json(json!({"username": "alice", "password": "wrong-password"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/token/")
            .set_json(json!({"username": "alice", "password": "Str0ngPass!"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let tokens: Value = test::read_body_json(resp).await;

        // access token 不能当作 refresh token 使用
        let req = test::TestRequest::post()
            .uri("/api/auth/token/refresh/")
            .set_json(json!({"refresh": tokens["access"]}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/token/refresh/")
            .set_json(json!({"refresh": tokens["refresh"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let refreshed: Value = test::read_body_json(resp).await;
        assert!(refreshed["access"].is_string());
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let (_, storage) = test_support::storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get().uri("/api/auth/me/").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::get()
            .uri("/api/auth/me/")
            .insert_header(bearer("not-a-jwt"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_update_profile_partial() {
        let (storage, data) = test_support::storage().await;
        let app = test_app!(data);
        let user = storage.test_user("pat").await;
        let token = crate::utils::jwt::JwtUtils::generate_access_token(user.id).unwrap();

        let req = test::TestRequest::patch()
            .uri("/api/auth/profile/")
            .insert_header(bearer(&token))
            .set_json(json!({"year_intake": "SEM2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let profile: Value = test::read_body_json(resp).await;
        assert_eq!(profile["year_intake"], "SEM2");
        assert_eq!(profile["program_level"], "UNDERGRAD");

        let req = test::TestRequest::patch()
            .uri("/api/auth/profile/")
            .insert_header(bearer(&token))
            .set_json(json!({"program_level": "PHD"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
