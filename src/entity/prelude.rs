//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::course_prerequisites::{
    ActiveModel as CoursePrerequisiteActiveModel, Entity as CoursePrerequisites,
    Model as CoursePrerequisiteModel,
};
pub use super::course_reviews::{
    ActiveModel as CourseReviewActiveModel, Entity as CourseReviews, Model as CourseReviewModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::planned_courses::{
    ActiveModel as PlannedCourseActiveModel, Entity as PlannedCourses,
    Model as PlannedCourseModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::programs::{
    ActiveModel as ProgramActiveModel, Entity as Programs, Model as ProgramModel,
};
pub use super::semesters::{
    ActiveModel as SemesterActiveModel, Entity as Semesters, Model as SemesterModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
