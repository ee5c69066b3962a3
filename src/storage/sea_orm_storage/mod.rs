//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod planner;
mod programs;
mod reviews;
mod users;

use crate::config::AppConfig;
use crate::errors::{PlannerError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PlannerError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PlannerError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PlannerError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PlannerError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 测试用内存数据库（单连接，保证所有查询落在同一个内存库）
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| PlannerError::database_connection(format!("内存数据库连接失败: {e}")))?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| PlannerError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PlannerError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::common::choices::{AssessmentType, ProgramLevel, StudyArea, YearIntake};
    use crate::models::courses::entities::{Course, NewCourse};
    use crate::models::users::entities::{NewUser, User};

    pub fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            program_level: ProgramLevel::Undergrad,
            program: "Computer Science".to_string(),
            year_intake: YearIntake::Sem1,
        }
    }

    pub fn new_course(code: &str) -> NewCourse {
        NewCourse {
            code: code.to_string(),
            name: format!("{code} course"),
            level: 1,
            credits: 2,
            aim: "Learn things".to_string(),
            assessment_type: Some(AssessmentType::Mix),
            study_area: Some(StudyArea::Eait),
            offered_sem_1: true,
            offered_sem_2: false,
            offered_summer: false,
            description: "A course".to_string(),
        }
    }

    impl SeaOrmStorage {
        pub async fn test_user(&self, username: &str) -> User {
            self.create_user_with_profile_impl(new_user(username))
                .await
                .expect("create test user")
        }

        pub async fn test_course(&self, code: &str) -> Course {
            self.get_or_create_course_impl(new_course(code), Vec::new())
                .await
                .expect("create test course")
                .0
        }
    }
}

// Storage trait 实现
use crate::models::{
    common::choices::ProgramLevel,
    courses::entities::{Assessment, Course, NewAssessment, NewCourse},
    planner::entities::{PlannedCourse, Semester, SemesterRemoval},
    programs::{entities::Program, requests::ProgramSearchQuery},
    reviews::{
        entities::{CourseReview, ReviewWrite},
        requests::ReviewInput,
    },
    users::entities::{NewUser, Profile, ProfileChanges, User},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user_with_profile(&self, user: NewUser) -> Result<User> {
        self.create_user_with_profile_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_credentials(&self, username: &str) -> Result<Option<(User, String)>> {
        self.get_user_credentials_impl(username).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.get_profile_impl(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: i64,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(user_id, changes).await
    }

    // 课程模块
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    async fn list_assessments(&self, course_id: i64) -> Result<Vec<Assessment>> {
        self.list_assessments_impl(course_id).await
    }

    async fn list_prerequisite_codes(&self, course_id: i64) -> Result<Vec<String>> {
        self.list_prerequisite_codes_impl(course_id).await
    }

    async fn get_or_create_course(
        &self,
        course: NewCourse,
        assessments: Vec<NewAssessment>,
    ) -> Result<(Course, bool)> {
        self.get_or_create_course_impl(course, assessments).await
    }

    async fn add_prerequisite(&self, course_id: i64, prereq_id: i64) -> Result<bool> {
        self.add_prerequisite_impl(course_id, prereq_id).await
    }

    // 学位项目模块
    async fn search_programs(&self, query: ProgramSearchQuery) -> Result<Vec<Program>> {
        self.search_programs_impl(query).await
    }

    async fn get_or_create_program(&self, name: &str, level: ProgramLevel) -> Result<Program> {
        self.get_or_create_program_impl(name, level).await
    }

    // 评价模块
    async fn list_reviews(&self, course_id: i64) -> Result<Vec<CourseReview>> {
        self.list_reviews_impl(course_id).await
    }

    async fn upsert_review(
        &self,
        user_id: i64,
        course_id: i64,
        input: ReviewInput,
    ) -> Result<(CourseReview, ReviewWrite)> {
        self.upsert_review_impl(user_id, course_id, input).await
    }

    // 规划模块
    async fn list_semesters(&self, user_id: i64) -> Result<Vec<Semester>> {
        self.list_semesters_impl(user_id).await
    }

    async fn ensure_default_semesters(&self, user_id: i64, count: i32) -> Result<Vec<Semester>> {
        self.ensure_default_semesters_impl(user_id, count).await
    }

    async fn create_next_semester(&self, user_id: i64) -> Result<Semester> {
        self.create_next_semester_impl(user_id).await
    }

    async fn remove_latest_semester(&self, user_id: i64) -> Result<SemesterRemoval> {
        self.remove_latest_semester_impl(user_id).await
    }

    async fn list_planned_courses(&self, user_id: i64) -> Result<Vec<PlannedCourse>> {
        self.list_planned_courses_impl(user_id).await
    }

    async fn upsert_planned_course(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<PlannedCourse> {
        self.upsert_planned_course_impl(user_id, course_id, semester)
            .await
    }

    async fn update_planned_course_semester(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<Option<PlannedCourse>> {
        self.update_planned_course_semester_impl(user_id, course_id, semester)
            .await
    }

    async fn delete_planned_course(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.delete_planned_course_impl(user_id, course_id).await
    }
}
