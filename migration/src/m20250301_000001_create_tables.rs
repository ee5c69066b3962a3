use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建用户档案表（与用户一对一）
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::ProgramLevel).string_len(16).not_null())
                    .col(ColumnDef::new(Profiles::Program).string().not_null())
                    .col(ColumnDef::new(Profiles::YearIntake).string_len(8).not_null())
                    .col(ColumnDef::new(Profiles::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建专业目录表
        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Programs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Programs::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Programs::Level).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Level).integer().not_null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null())
                    .col(ColumnDef::new(Courses::Aim).text().not_null())
                    .col(ColumnDef::new(Courses::AssessmentType).string_len(16).null())
                    .col(ColumnDef::new(Courses::StudyArea).string_len(128).null())
                    .col(
                        ColumnDef::new(Courses::OfferedSem1)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Courses::OfferedSem2)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Courses::OfferedSummer)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建考核项目表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::Category).string().not_null())
                    .col(ColumnDef::new(Assessments::Task).string().not_null())
                    .col(ColumnDef::new(Assessments::Mode).string().not_null())
                    .col(
                        ColumnDef::new(Assessments::GradingType)
                            .string_len(20)
                            .not_null()
                            .default("percentage"),
                    )
                    .col(ColumnDef::new(Assessments::Weight).integer().null())
                    .col(ColumnDef::new(Assessments::Description).text().not_null())
                    .col(
                        ColumnDef::new(Assessments::Hurdle)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assessments::HurdleDescription).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建先修课程关联表（课程自引用多对多）
        manager
            .create_table(
                Table::create()
                    .table(CoursePrerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePrerequisites::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::PrereqId)
                            .big_integer()
                            .not_null(),
                    )
                    .check(
                        Expr::col(CoursePrerequisites::CourseId)
                            .ne(Expr::col(CoursePrerequisites::PrereqId)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePrerequisites::Table, CoursePrerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePrerequisites::Table, CoursePrerequisites::PrereqId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程评价表
        manager
            .create_table(
                Table::create()
                    .table(CourseReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseReviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseReviews::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CourseReviews::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseReviews::Review).double().not_null())
                    .col(ColumnDef::new(CourseReviews::Description).text().null())
                    .col(
                        ColumnDef::new(CourseReviews::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseReviews::Table, CourseReviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseReviews::Table, CourseReviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学期表
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semesters::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Semesters::SemesterNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Semesters::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Semesters::Table, Semesters::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课计划表
        manager
            .create_table(
                Table::create()
                    .table(PlannedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlannedCourses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlannedCourses::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(PlannedCourses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlannedCourses::Semester).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlannedCourses::Table, PlannedCourses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlannedCourses::Table, PlannedCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束索引（upsert 依赖这些约束）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_course_prerequisites_course_prereq")
                    .table(CoursePrerequisites::Table)
                    .col(CoursePrerequisites::CourseId)
                    .col(CoursePrerequisites::PrereqId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_course_reviews_user_course")
                    .table(CourseReviews::Table)
                    .col(CourseReviews::UserId)
                    .col(CourseReviews::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_semesters_user_number")
                    .table(Semesters::Table)
                    .col(Semesters::UserId)
                    .col(Semesters::SemesterNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_planned_courses_user_course")
                    .table(PlannedCourses::Table)
                    .col(PlannedCourses::UserId)
                    .col(PlannedCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_programs_level")
                    .table(Programs::Table)
                    .col(Programs::Level)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_course_id")
                    .table(Assessments::Table)
                    .col(Assessments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_reviews_course_id")
                    .table(CourseReviews::Table)
                    .col(CourseReviews::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(PlannedCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoursePrerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    UserId,
    ProgramLevel,
    Program,
    YearIntake,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Programs {
    #[sea_orm(iden = "programs")]
    Table,
    Id,
    Name,
    Level,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Code,
    Name,
    Level,
    Credits,
    Aim,
    AssessmentType,
    StudyArea,
    #[sea_orm(iden = "offered_sem_1")]
    OfferedSem1,
    #[sea_orm(iden = "offered_sem_2")]
    OfferedSem2,
    OfferedSummer,
    Description,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    CourseId,
    Category,
    Task,
    Mode,
    GradingType,
    Weight,
    Description,
    Hurdle,
    HurdleDescription,
}

#[derive(DeriveIden)]
enum CoursePrerequisites {
    #[sea_orm(iden = "course_prerequisites")]
    Table,
    Id,
    CourseId,
    PrereqId,
}

#[derive(DeriveIden)]
enum CourseReviews {
    #[sea_orm(iden = "course_reviews")]
    Table,
    Id,
    UserId,
    CourseId,
    Review,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Semesters {
    #[sea_orm(iden = "semesters")]
    Table,
    Id,
    UserId,
    SemesterNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PlannedCourses {
    #[sea_orm(iden = "planned_courses")]
    Table,
    Id,
    UserId,
    CourseId,
    Semester,
}
