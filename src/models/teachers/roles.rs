//! 角色与角色解析结果

use serde::Serialize;
use tracing::warn;
use ts_rs::TS;

use super::entities::Teacher;
use crate::errors::{QuizRoomError, Result};

const TEACHER_ROUTES: &[&str] = &[
    "/",
    "/create-question",
    "/create-class",
    "/create-session",
    "/class/:classId",
    "/session/:sessionId",
];

const STUDENT_ROUTES: &[&str] = &["/", "/session/:sessionId"];

/// 角色查询的三种结局
///
/// `LookupFailed` 与 `Student` 分开，失败时由调用方按策略决定去向。
#[derive(Debug, Clone, PartialEq)]
pub enum RoleResolution {
    Teacher(Teacher),
    Student,
    LookupFailed(String),
}

impl RoleResolution {
    /// 转换为最终角色
    ///
    /// `fail_open` 为 true 时查询失败降级为学生，否则返回 `RoleLookup` 错误。
    pub fn into_role(self, email: &str, fail_open: bool) -> Result<Role> {
        match self {
            RoleResolution::Teacher(teacher) => Ok(Role::Teacher(teacher)),
            RoleResolution::Student => Ok(Role::Student),
            RoleResolution::LookupFailed(reason) => {
                warn!("Role lookup failed for {}: {}", email, reason);
                if fail_open {
                    Ok(Role::Student)
                } else {
                    Err(QuizRoomError::role_lookup(reason))
                }
            }
        }
    }
}

/// 已解析的用户角色
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Teacher(Teacher),
    Student,
}

impl Role {
    pub fn is_teacher(&self) -> bool {
        matches!(self, Role::Teacher(_))
    }

    pub fn teacher(&self) -> Option<&Teacher> {
        match self {
            Role::Teacher(teacher) => Some(teacher),
            Role::Student => None,
        }
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Teacher(_) => RoleKind::Teacher,
            Role::Student => RoleKind::Student,
        }
    }

    /// 客户端可展示的路由
    pub fn routes(&self) -> &'static [&'static str] {
        match self {
            Role::Teacher(_) => TEACHER_ROUTES,
            Role::Student => STUDENT_ROUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../bindings/teacher.ts")]
pub enum RoleKind {
    Teacher,
    Student,
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleKind::Teacher => write!(f, "teacher"),
            RoleKind::Student => write!(f, "student"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Teacher {
        Teacher {
            id: 7,
            email: "t@school.edu".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_teacher_resolution() {
        let role = RoleResolution::Teacher(teacher())
            .into_role("t@school.edu", true)
            .unwrap();
        assert!(role.is_teacher());
        assert_eq!(role.routes().len(), 6);
        assert!(role.routes().contains(&"/create-session"));
    }

    #[test]
    fn test_student_routes() {
        let role = RoleResolution::Student.into_role("s@x.com", true).unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(role.routes(), &["/", "/session/:sessionId"]);
    }

    #[test]
    fn test_lookup_failure_fail_open() {
        let role = RoleResolution::LookupFailed("timeout".into())
            .into_role("s@x.com", true)
            .unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_lookup_failure_fail_closed() {
        let err = RoleResolution::LookupFailed("timeout".into())
            .into_role("s@x.com", false)
            .unwrap_err();
        assert_eq!(err.code(), "Q012");
        assert_eq!(err.message(), "timeout");
    }
}
