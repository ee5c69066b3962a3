pub mod auth;

pub mod catalog;

pub mod courses;

pub mod health;

pub mod planner;

pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use courses::configure_courses_routes;
pub use health::configure_health_routes;
pub use planner::configure_planner_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_courses_routes)
        .configure(configure_catalog_routes)
        .configure(configure_planner_routes);
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;

    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::{json_error_handler, query_error_handler};

    pub async fn storage() -> (SeaOrmStorage, web::Data<Arc<dyn Storage>>) {
        let storage = SeaOrmStorage::in_memory()
            .await
            .expect("in-memory storage");
        let shared: Arc<dyn Storage> = Arc::new(storage.clone());
        (storage, web::Data::new(shared))
    }

    pub fn cache() -> web::Data<Arc<dyn ObjectCache>> {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(1_000, 60));
        web::Data::new(cache)
    }

    pub fn json_config() -> web::JsonConfig {
        web::JsonConfig::default().error_handler(json_error_handler)
    }

    pub fn query_config() -> web::QueryConfig {
        web::QueryConfig::default().error_handler(query_error_handler)
    }

    /// 以 Bearer 形式携带 access token
    pub fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    /// 构建带全部路由的测试应用
    macro_rules! test_app {
        ($storage:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data($crate::routes::test_support::query_config())
                    .app_data($crate::routes::test_support::json_config())
                    .app_data($storage.clone())
                    .app_data($crate::routes::test_support::cache())
                    .configure($crate::routes::configure_api_routes),
            )
            .await
        };
    }

    pub(crate) use test_app;
}
