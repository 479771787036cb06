pub mod auth;
pub mod catalog;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod images;
pub mod questions;
pub mod sessions;
pub mod teachers;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    ServiceUnavailable = 1503,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserAlreadyExists = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    MagicLinkInvalid = 2005,
    DevLoginDisabled = 2006,

    // 班级
    ClassNotFound = 3000,
    ClassCreationFailed = 3001,
    ClassUpdateFailed = 3002,
    ClassDeleteFailed = 3003,
    ClassMemberInvalid = 3004,
    ClassMemberNotFound = 3005,

    // 课程与标签
    CourseAlreadyExists = 4000,
    TagAlreadyExists = 4001,
    CatalogCreationFailed = 4002,

    // 题目
    QuestionInvalid = 5000,
    QuestionCreationFailed = 5001,

    // 测验会话
    SessionInvalid = 6000,
    SessionNotFound = 6001,
    SessionCreationFailed = 6002,
    SessionExpired = 6003,
    SessionInactive = 6004,
    SessionJoinFailed = 6005,
    QuizRoundNotFound = 6006,
    AnswerInvalid = 6007,

    // 图片与文件
    FileNotFound = 7000,
    FileTypeNotAllowed = 7001,
    FileSizeExceeded = 7002,
    FileUploadFailed = 7003,
    MultifileUploadNotAllowed = 7004,
    ImageProcessingFailed = 7005,
}
