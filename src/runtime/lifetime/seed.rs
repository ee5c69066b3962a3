//! 目录占位数据
//!
//! 课程表为空且 `app.seed_catalog` 开启时写入；按课程代码 / 项目名称
//! get-or-create，重复执行不会产生重复数据。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::common::choices::{AssessmentType, GradingType, ProgramLevel, StudyArea};
use crate::models::courses::entities::{NewAssessment, NewCourse};
use crate::storage::Storage;

const SAMPLE_PROGRAMS: &[(&str, ProgramLevel)] = &[
    ("Bachelor of Computer Science", ProgramLevel::Undergrad),
    ("Bachelor of Engineering (Honours)", ProgramLevel::Undergrad),
    ("Bachelor of Information Technology", ProgramLevel::Undergrad),
    ("Master of Computer Science", ProgramLevel::Postgrad),
    ("Master of Data Science", ProgramLevel::Postgrad),
];

const AI_NOTICE: &str = "Whilst students may use AI and/or MT technologies, successful completion \
of assessment in this course will require students to critically engage in specific contexts.";

const TEAM_HURDLE: &str = "This submission has both a team component and a short individual \
self reflection. Students must achieve a Pass on both items to be eligible to Pass the course.";

fn comp1100() -> (NewCourse, Vec<NewAssessment>) {
    let course = NewCourse {
        code: "COMP1100".to_string(),
        name: "Introduction to Software Innovation".to_string(),
        level: 1,
        credits: 2,
        aim: "Introduce the fundamentals of innovation in computer science and information \
              technology through a discipline-specific team project."
            .to_string(),
        assessment_type: Some(AssessmentType::Assignment),
        study_area: Some(StudyArea::Eait),
        offered_sem_1: true,
        offered_sem_2: true,
        offered_summer: false,
        description: "Introduction to innovation using computer science and information \
                      technology through a discipline-specific team project."
            .to_string(),
    };

    let canvas = |iteration: u8| NewAssessment {
        category: "Paper/ Report/ Annotation, Product/ Design, Reflection".to_string(),
        task: format!("Business model canvas iteration {iteration}"),
        mode: "Written".to_string(),
        grading_type: GradingType::PassFail,
        weight: None,
        description: format!(
            "A team report outlining the customer discovery findings from iteration {iteration}. {AI_NOTICE}"
        ),
        hurdle: true,
        hurdle_description: Some(TEAM_HURDLE.to_string()),
    };

    let assessments = vec![
        NewAssessment {
            category: "Participation/ Student contribution, Practical/ Demonstration, Presentation"
                .to_string(),
            task: "Studio participation".to_string(),
            mode: "Activity/ Performance, Oral, Product/ Artefact/ Multimedia".to_string(),
            grading_type: GradingType::PassFail,
            weight: None,
            description: format!(
                "Participation in the weekly seminar and studios, including presentation and practice sessions. {AI_NOTICE}"
            ),
            hurdle: true,
            hurdle_description: Some(
                "Students must attend and participate each of the listed weeks.".to_string(),
            ),
        },
        canvas(1),
        canvas(2),
        NewAssessment {
            category: "Computer Code, Paper/ Report/ Annotation, Presentation, Reflection"
                .to_string(),
            task: "Code submission and business model canvas iteration 3".to_string(),
            mode: "Oral, Product/ Artefact/ Multimedia, Written".to_string(),
            grading_type: GradingType::PassFail,
            weight: None,
            description: format!(
                "A team report on the third iteration and an implemented conceptual prototype. {AI_NOTICE}"
            ),
            hurdle: true,
            hurdle_description: Some(TEAM_HURDLE.to_string()),
        },
    ];

    (course, assessments)
}

fn programming_course(
    code: &str,
    name: &str,
    level: i32,
    exam_weight: i32,
) -> (NewCourse, Vec<NewAssessment>) {
    let course = NewCourse {
        code: code.to_string(),
        name: name.to_string(),
        level,
        credits: 2,
        aim: format!("{name} builds practical software development skills."),
        assessment_type: Some(AssessmentType::Mix),
        study_area: Some(StudyArea::Eait),
        offered_sem_1: true,
        offered_sem_2: true,
        offered_summer: level == 1,
        description: format!("{name}: programming assignments and a final examination."),
    };

    let assessments = vec![
        NewAssessment {
            category: "Computer Code".to_string(),
            task: "Programming assignments".to_string(),
            mode: "Product/ Artefact/ Multimedia".to_string(),
            grading_type: GradingType::Percentage,
            weight: Some(100 - exam_weight),
            description: "Individual programming assignments.".to_string(),
            hurdle: false,
            hurdle_description: None,
        },
        NewAssessment {
            category: "Examination".to_string(),
            task: "Final examination".to_string(),
            mode: "Written".to_string(),
            grading_type: GradingType::Percentage,
            weight: Some(exam_weight),
            description: "Invigilated end of semester examination.".to_string(),
            hurdle: true,
            hurdle_description: Some("Students must score at least 40% on the exam.".to_string()),
        },
    ];

    (course, assessments)
}

/// 写入占位目录数据
pub async fn seed_catalog(storage: &Arc<dyn Storage>) -> Result<()> {
    let existing = storage.count_courses().await?;
    if existing > 0 {
        debug!("Catalog already has {} course(s), skipping seed", existing);
        return Ok(());
    }

    info!("Course catalog is empty, inserting placeholder data...");

    let mut created = 0;
    for (course, assessments) in [
        comp1100(),
        programming_course("CSSE1001", "Introduction to Software Engineering", 1, 50),
        programming_course("CSSE2002", "Programming in the Large", 2, 40),
    ] {
        let (_, was_created) = storage.get_or_create_course(course, assessments).await?;
        if was_created {
            created += 1;
        }
    }

    // CSSE2002 以 CSSE1001 为先修课程
    let courses = storage.list_courses().await?;
    let find = |code: &str| courses.iter().find(|c| c.code == code).map(|c| c.id);
    match (find("CSSE2002"), find("CSSE1001")) {
        (Some(course_id), Some(prereq_id)) => {
            storage.add_prerequisite(course_id, prereq_id).await?;
        }
        _ => warn!("Seeded courses missing, prerequisite link skipped"),
    }

    for (name, level) in SAMPLE_PROGRAMS {
        storage.get_or_create_program(name, *level).await?;
    }

    info!(
        "Seeded {} course(s) and {} program(s)",
        created,
        SAMPLE_PROGRAMS.len()
    );
    Ok(())
}
