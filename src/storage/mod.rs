use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户与档案
    // 在同一事务中创建用户及其档案
    async fn create_user_with_profile(&self, user: NewUser) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 获取用户及其密码哈希（登录校验用）
    async fn get_user_credentials(&self, username: &str) -> Result<Option<(User, String)>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
    // 部分更新档案，档案不存在时返回 None
    async fn update_profile(&self, user_id: i64, changes: ProfileChanges)
    -> Result<Option<Profile>>;

    /// 课程目录
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn count_courses(&self) -> Result<u64>;
    async fn list_assessments(&self, course_id: i64) -> Result<Vec<Assessment>>;
    // 直接先修课程的代码（不做传递闭包）
    async fn list_prerequisite_codes(&self, course_id: i64) -> Result<Vec<String>>;
    // 按代码获取或创建课程，返回 (课程, 是否新建)
    async fn get_or_create_course(
        &self,
        course: NewCourse,
        assessments: Vec<NewAssessment>,
    ) -> Result<(Course, bool)>;
    async fn add_prerequisite(&self, course_id: i64, prereq_id: i64) -> Result<bool>;

    /// 学位项目
    async fn search_programs(&self, query: ProgramSearchQuery) -> Result<Vec<Program>>;
    async fn get_or_create_program(&self, name: &str, level: ProgramLevel) -> Result<Program>;

    /// 课程评价
    async fn list_reviews(&self, course_id: i64) -> Result<Vec<CourseReview>>;
    // 以 (user, course) 为键原子地新建或覆盖评价
    async fn upsert_review(
        &self,
        user_id: i64,
        course_id: i64,
        input: ReviewInput,
    ) -> Result<(CourseReview, ReviewWrite)>;

    /// 学期规划
    async fn list_semesters(&self, user_id: i64) -> Result<Vec<Semester>>;
    // 用户没有任何学期时创建 1..=count
    async fn ensure_default_semesters(&self, user_id: i64, count: i32) -> Result<Vec<Semester>>;
    async fn create_next_semester(&self, user_id: i64) -> Result<Semester>;
    async fn remove_latest_semester(&self, user_id: i64) -> Result<SemesterRemoval>;
    async fn list_planned_courses(&self, user_id: i64) -> Result<Vec<PlannedCourse>>;
    // 以 (user, course) 为键原子地新建或移动到指定学期
    async fn upsert_planned_course(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<PlannedCourse>;
    async fn update_planned_course_semester(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<Option<PlannedCourse>>;
    async fn delete_planned_course(&self, user_id: i64, course_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
