//! 作答接口测试：请求经由 SessionService，轮次存在内存缓存中

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, test, web};
use serde_json::Value;

use rust_quizroom::cache::object_cache::moka::MokaCacheWrapper;
use rust_quizroom::cache::{CacheResult, ObjectCache};
use rust_quizroom::models::ErrorCode;
use rust_quizroom::models::questions::requests::AnswerInput;
use rust_quizroom::models::sessions::{
    QuizRound, SessionDraft,
    draft::{EligibilityScope, ValidatedDraft},
    requests::SubmitAnswerRequest,
};
use rust_quizroom::models::teachers::entities::Teacher;
use rust_quizroom::models::users::entities::CurrentUser;
use rust_quizroom::services::sessions::SessionService;
use rust_quizroom::storage::{NewQuestion, Storage, sea_orm_storage::SeaOrmStorage};

const STUDENT: &str = "alice@school.edu";

struct Env {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    service: SessionService,
    teacher: Teacher,
    class_id: i64,
    course_id: i64,
}

async fn env() -> Env {
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database"),
    );
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(1000, 3600));

    let teacher = storage.ensure_teacher("teacher@school.edu").await.unwrap();
    let course = storage.create_course("Mathematics", None).await.unwrap();
    let class = storage
        .create_class(teacher.id, "Algebra I", None)
        .await
        .unwrap();
    storage
        .add_class_members(
            class.id,
            &[STUDENT.to_string(), "bob@school.edu".to_string()],
        )
        .await
        .unwrap();

    Env {
        storage,
        cache,
        service: SessionService::new_lazy(),
        teacher,
        class_id: class.id,
        course_id: course.id,
    }
}

impl Env {
    fn request(&self) -> HttpRequest {
        test::TestRequest::default()
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.cache.clone()))
            .to_http_request()
    }

    fn student_request(&self, email: &str) -> HttpRequest {
        let req = self.request();
        req.extensions_mut().insert(CurrentUser {
            email: email.to_string(),
            user_id: None,
            access_token: String::new(),
        });
        req
    }

    fn teacher_request(&self) -> HttpRequest {
        let req = self.student_request(&self.teacher.email);
        req.extensions_mut().insert(self.teacher.clone());
        req
    }

    async fn question(&self, title: &str, tag_ids: &[i64]) -> i64 {
        let question = self
            .storage
            .create_question(NewQuestion {
                teacher_id: self.teacher.id,
                course_id: self.course_id,
                title: title.to_string(),
                content: format!("{title}?"),
                image_url: None,
                image_filename: None,
            })
            .await
            .unwrap();
        self.storage
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
        if !tag_ids.is_empty() {
            self.storage
                .attach_question_tags(question.id, tag_ids)
                .await
                .unwrap();
        }
        question.id
    }

    async fn session(&self, expires_at: Option<chrono::DateTime<chrono::Utc>>) -> i64 {
        let draft = ValidatedDraft {
            name: "Warm-up".into(),
            description: None,
            class_id: self.class_id,
            scope: EligibilityScope {
                course_id: Some(self.course_id),
                ..Default::default()
            },
            expires_at,
        };
        self.storage
            .create_session(self.teacher.id, &draft)
            .await
            .unwrap()
            .id
    }

    async fn answer_ids(&self, question_id: i64) -> (i64, i64) {
        let payload = self
            .storage
            .get_question_with_answers(question_id)
            .await
            .unwrap()
            .unwrap();
        let correct = payload.answers.iter().find(|a| a.is_correct).unwrap().id;
        let wrong = payload.answers.iter().find(|a| !a.is_correct).unwrap().id;
        (correct, wrong)
    }
}

async fn body_json(resp: HttpResponse) -> Value {
    let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn code(body: &Value) -> i64 {
    body["code"].as_i64().unwrap()
}

#[actix_web::test]
async fn test_fractions_class_flow_marks_correct_answer() {
    let env = env().await;
    let fractions = env
        .storage
        .create_tag("Fractions", None, "#F59E0B")
        .await
        .unwrap();
    let tagged = env.question("Half of eight", &[fractions.id]).await;
    env.question("Solve x + 2 = 5", &[]).await;

    let draft = SessionDraft {
        name: "Fractions practice".into(),
        description: None,
        class_id: Some(env.class_id),
        course_id: None,
        tag_ids: vec![fractions.id],
        question_ids: Vec::new(),
        expires_at: None,
    };
    let resp = env
        .service
        .create_session(&env.teacher_request(), draft)
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body = body_json(resp).await;
    let session_id = body["data"]["session"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["attached_tags"], 1);

    let resp = env
        .service
        .join_session(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // 只会抽到带 Fractions 标签的题
    for _ in 0..5 {
        let resp = env
            .service
            .next_question(&env.student_request(STUDENT), session_id)
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["status"], "question");
        assert_eq!(body["data"]["round"]["question_id"], tagged);
        assert_eq!(body["data"]["round"]["revealed"], false);
    }

    let (correct, _) = env.answer_ids(tagged).await;
    let resp = env
        .service
        .submit_answer(
            &env.student_request(STUDENT),
            session_id,
            SubmitAnswerRequest { answer_id: correct },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["revealed"], true);
    assert_eq!(body["data"]["is_correct"], true);

    let options = body["data"]["options"].as_array().unwrap();
    for option in options {
        if option["id"] == correct {
            assert_eq!(option["highlight"], "correct");
            assert_eq!(option["is_selected"], true);
        } else {
            assert!(option["highlight"].is_null());
            assert_eq!(option["is_selected"], false);
        }
    }
}

#[actix_web::test]
async fn test_current_question_is_stable_until_next() {
    let env = env().await;
    env.question("Two thirds", &[]).await;
    env.question("Three quarters", &[]).await;
    let session_id = env.session(None).await;

    let first = body_json(
        env.service
            .current_question(&env.student_request(STUDENT), session_id)
            .await
            .unwrap(),
    )
    .await;
    let question_id = first["data"]["round"]["question_id"].clone();

    for _ in 0..3 {
        let again = body_json(
            env.service
                .current_question(&env.student_request(STUDENT), session_id)
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(again["data"]["round"]["question_id"], question_id);
    }
}

#[actix_web::test]
async fn test_second_submit_keeps_revealed_round() {
    let env = env().await;
    let question = env.question("One fifth", &[]).await;
    let session_id = env.session(None).await;
    let (correct, wrong) = env.answer_ids(question).await;

    env.service
        .current_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();

    let first = body_json(
        env.service
            .submit_answer(
                &env.student_request(STUDENT),
                session_id,
                SubmitAnswerRequest { answer_id: wrong },
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["data"]["is_correct"], false);

    let resp = env
        .service
        .submit_answer(
            &env.student_request(STUDENT),
            session_id,
            SubmitAnswerRequest { answer_id: correct },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let second = body_json(resp).await;
    assert_eq!(second["data"]["selected_answer_id"], wrong);
    assert_eq!(second["data"]["is_correct"], false);
    assert_eq!(second["data"]["options"], first["data"]["options"]);
}

#[actix_web::test]
async fn test_submit_without_fetched_question() {
    let env = env().await;
    let question = env.question("Six eighths", &[]).await;
    let session_id = env.session(None).await;
    let (correct, _) = env.answer_ids(question).await;

    let resp = env
        .service
        .submit_answer(
            &env.student_request(STUDENT),
            session_id,
            SubmitAnswerRequest { answer_id: correct },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body = body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::QuizRoundNotFound as i64);
}

#[actix_web::test]
async fn test_expired_session_refuses_and_drops_round() {
    let env = env().await;
    let question = env.question("Nine twelfths", &[]).await;
    let expired = chrono::Utc::now() - chrono::Duration::minutes(5);
    let session_id = env.session(Some(expired)).await;

    // 过期前留下的轮次
    let payload = env
        .storage
        .get_question_with_answers(question)
        .await
        .unwrap()
        .unwrap();
    let key = QuizRound::cache_key(session_id, STUDENT);
    env.cache
        .insert_json(key.clone(), &QuizRound::new(session_id, payload), 0)
        .await
        .unwrap();

    let resp = env
        .service
        .current_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(code(&body_json(resp).await), ErrorCode::SessionExpired as i64);
    assert!(matches!(env.cache.get_raw(&key).await, CacheResult::NotFound));

    let (correct, _) = env.answer_ids(question).await;
    let resp = env
        .service
        .submit_answer(
            &env.student_request(STUDENT),
            session_id,
            SubmitAnswerRequest { answer_id: correct },
        )
        .await
        .unwrap();
    assert_eq!(code(&body_json(resp).await), ErrorCode::SessionExpired as i64);

    let resp = env
        .service
        .next_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(code(&body_json(resp).await), ErrorCode::SessionExpired as i64);
}

#[actix_web::test]
async fn test_deleted_session_stops_serving_cached_round() {
    let env = env().await;
    let question = env.question("Four tenths", &[]).await;
    let session_id = env.session(None).await;
    let (correct, _) = env.answer_ids(question).await;

    let resp = env
        .service
        .current_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert!(env.storage.delete_session(session_id).await.unwrap());

    let resp = env
        .service
        .current_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(code(&body_json(resp).await), ErrorCode::SessionNotFound as i64);

    let resp = env
        .service
        .submit_answer(
            &env.student_request(STUDENT),
            session_id,
            SubmitAnswerRequest { answer_id: correct },
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(code(&body_json(resp).await), ErrorCode::SessionNotFound as i64);

    let key = QuizRound::cache_key(session_id, STUDENT);
    assert!(matches!(env.cache.get_raw(&key).await, CacheResult::NotFound));
}

#[actix_web::test]
async fn test_empty_pool_reports_no_questions() {
    let env = env().await;
    let session_id = env.session(None).await;

    let resp = env
        .service
        .current_question(&env.student_request(STUDENT), session_id)
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["status"], "no_questions_available");
}
