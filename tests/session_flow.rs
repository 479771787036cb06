//! 基于内存 SQLite 的会话流程测试

use std::sync::Arc;

use rust_quizroom::models::questions::requests::AnswerInput;
use rust_quizroom::models::sessions::{QuizRound, SessionDraft, round::SubmitOutcome};
use rust_quizroom::services::sessions::overview::build_overviews;
use rust_quizroom::services::sessions::saga::{SagaStep, SessionCreationSaga};
use rust_quizroom::storage::{NewQuestion, Storage, sea_orm_storage::SeaOrmStorage};

struct Fixture {
    storage: Arc<dyn Storage>,
    teacher_id: i64,
    class_id: i64,
    course_id: i64,
    tag_id: i64,
    tagged_question: i64,
    untagged_question: i64,
}

async fn memory_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database");
    Arc::new(storage)
}

async fn add_question(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    course_id: i64,
    title: &str,
) -> i64 {
    let question = storage
        .create_question(NewQuestion {
            teacher_id,
            course_id,
            title: title.to_string(),
            content: format!("{title}?"),
            image_url: None,
            image_filename: None,
        })
        .await
        .unwrap();
    storage
        .create_answers(
            question.id,
            &[
                AnswerInput {
                    content: "right".into(),
                    is_correct: true,
                },
                AnswerInput {
                    content: "wrong".into(),
                    is_correct: false,
                },
            ],
        )
        .await
        .unwrap();
    question.id
}

async fn fixture() -> Fixture {
    let storage = memory_storage().await;
    let teacher = storage.ensure_teacher("teacher@school.edu").await.unwrap();
    let course = storage.create_course("Biology", None).await.unwrap();
    let tag = storage.create_tag("cells", None, "#22C55E").await.unwrap();

    let tagged_question = add_question(&storage, teacher.id, course.id, "Mitochondria").await;
    storage
        .attach_question_tags(tagged_question, &[tag.id])
        .await
        .unwrap();
    let untagged_question = add_question(&storage, teacher.id, course.id, "Photosynthesis").await;

    let class = storage
        .create_class(teacher.id, "7A", Some("Morning group".into()))
        .await
        .unwrap();
    storage
        .add_class_members(
            class.id,
            &["alice@school.edu".to_string(), "bob@school.edu".to_string()],
        )
        .await
        .unwrap();

    Fixture {
        storage,
        teacher_id: teacher.id,
        class_id: class.id,
        course_id: course.id,
        tag_id: tag.id,
        tagged_question,
        untagged_question,
    }
}

fn draft(class_id: i64) -> SessionDraft {
    SessionDraft {
        name: "Cells quiz".into(),
        description: None,
        class_id: Some(class_id),
        course_id: None,
        tag_ids: Vec::new(),
        question_ids: Vec::new(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_ensure_teacher_is_idempotent() {
    let storage = memory_storage().await;
    let first = storage.ensure_teacher("t@school.edu").await.unwrap();
    let second = storage.ensure_teacher("t@school.edu").await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_saga_attaches_tags_and_questions() {
    let fx = fixture().await;
    let mut d = draft(fx.class_id);
    d.tag_ids = vec![fx.tag_id];
    d.question_ids = vec![fx.untagged_question];
    let validated = d.validate().unwrap();

    let report = SessionCreationSaga::new(fx.storage.clone())
        .run(fx.teacher_id, &validated)
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.attached_tags, 1);
    assert_eq!(report.attached_questions, 1);
    assert!(report.session.is_active);
}

#[tokio::test]
async fn test_saga_keeps_session_when_tags_fail() {
    let fx = fixture().await;
    let mut d = draft(fx.class_id);
    // 不存在的标签违反外键
    d.tag_ids = vec![9_999];
    let validated = d.validate().unwrap();

    let report = SessionCreationSaga::new(fx.storage.clone())
        .run(fx.teacher_id, &validated)
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.failures[0].step, SagaStep::AttachTags);
    let stored = fx
        .storage
        .get_session_by_id(report.session.id)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_eligibility_by_course_and_tags() {
    let fx = fixture().await;
    let mut d = draft(fx.class_id);
    d.course_id = Some(fx.course_id);
    d.tag_ids = vec![fx.tag_id];
    let validated = d.validate().unwrap();
    let report = SessionCreationSaga::new(fx.storage.clone())
        .run(fx.teacher_id, &validated)
        .await
        .unwrap();

    let scope = fx.storage.get_session_scope(&report.session).await.unwrap();
    let eligible = fx.storage.list_eligible_question_ids(&scope).await.unwrap();
    assert_eq!(eligible, vec![fx.tagged_question]);
}

#[tokio::test]
async fn test_explicit_questions_override_course() {
    let fx = fixture().await;
    let mut d = draft(fx.class_id);
    d.course_id = Some(fx.course_id);
    d.question_ids = vec![fx.untagged_question];
    let validated = d.validate().unwrap();
    let report = SessionCreationSaga::new(fx.storage.clone())
        .run(fx.teacher_id, &validated)
        .await
        .unwrap();

    let scope = fx.storage.get_session_scope(&report.session).await.unwrap();
    let eligible = fx.storage.list_eligible_question_ids(&scope).await.unwrap();
    assert_eq!(eligible, vec![fx.untagged_question]);
}

#[tokio::test]
async fn test_join_and_overview_counts() {
    let fx = fixture().await;
    let mut d = draft(fx.class_id);
    d.course_id = Some(fx.course_id);
    let validated = d.validate().unwrap();
    let report = SessionCreationSaga::new(fx.storage.clone())
        .run(fx.teacher_id, &validated)
        .await
        .unwrap();
    let session_id = report.session.id;

    // 重复加入不报错
    fx.storage
        .add_participant(session_id, "alice@school.edu")
        .await
        .unwrap();
    fx.storage
        .add_participant(session_id, "alice@school.edu")
        .await
        .unwrap();

    let active = fx
        .storage
        .list_active_sessions_for_classes(&[fx.class_id])
        .await
        .unwrap();
    let overviews = build_overviews(&fx.storage, active, Some("alice@school.edu"))
        .await
        .unwrap();

    assert_eq!(overviews.len(), 1);
    let overview = &overviews[0];
    assert_eq!(overview.class_name.as_deref(), Some("7A"));
    assert_eq!(overview.course_name.as_deref(), Some("Biology"));
    assert_eq!(overview.teacher_email.as_deref(), Some("teacher@school.edu"));
    assert_eq!(overview.participant_count, 2);
    assert!(overview.has_joined);
    assert_eq!(overview.time_remaining_label, "no limit");
}

#[tokio::test]
async fn test_round_grades_from_loaded_answers() {
    let fx = fixture().await;
    let payload = fx
        .storage
        .get_question_with_answers(fx.tagged_question)
        .await
        .unwrap()
        .unwrap();
    let wrong_id = payload
        .answers
        .iter()
        .find(|a| !a.is_correct)
        .map(|a| a.id)
        .unwrap();

    let mut round = QuizRound::new(1, payload);
    assert_eq!(
        round.submit(wrong_id).unwrap(),
        SubmitOutcome::Graded { correct: false }
    );
    assert_eq!(round.is_correct(), Some(false));
    assert_eq!(round.submit(wrong_id).unwrap(), SubmitOutcome::AlreadyRevealed);
}

#[tokio::test]
async fn test_class_summaries_and_membership() {
    let fx = fixture().await;
    let summaries = fx
        .storage
        .list_class_summaries_by_teacher(fx.teacher_id)
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].member_count, 2);

    let enrolled = fx
        .storage
        .list_classes_for_member("bob@school.edu")
        .await
        .unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, fx.class_id);
}
