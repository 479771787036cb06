//! 会话概要组装
//!
//! 班级、课程、教师、标签与参与人数按批查询，再按会话逐条拼装。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::models::sessions::{
    TimeRemaining, entities::Session, responses::SessionOverview,
};
use crate::storage::Storage;

/// `viewer_email` 为空时 `has_joined` 恒为 false
pub async fn build_overviews(
    storage: &Arc<dyn Storage>,
    sessions: Vec<Session>,
    viewer_email: Option<&str>,
) -> Result<Vec<SessionOverview>> {
    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    let session_ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    let class_ids = unique(sessions.iter().map(|s| s.class_id));
    let teacher_ids = unique(sessions.iter().map(|s| s.teacher_id));

    let class_names: HashMap<i64, String> = storage
        .list_classes_by_ids(&class_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let course_names: HashMap<i64, String> = storage
        .list_courses()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let teacher_emails: HashMap<i64, String> = storage
        .list_teachers_by_ids(&teacher_ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t.email))
        .collect();
    let mut tags = storage.list_session_tags(&session_ids).await?;
    let counts = storage.count_participants(&session_ids).await?;
    let joined: HashSet<i64> = match viewer_email {
        Some(email) => storage
            .list_joined_session_ids(email, &session_ids)
            .await?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    let now = Utc::now();
    Ok(sessions
        .into_iter()
        .map(|session| {
            let id = session.id;
            let class_name = class_names.get(&session.class_id).cloned();
            let course_name = session.course_id.and_then(|c| course_names.get(&c).cloned());
            let teacher_email = teacher_emails.get(&session.teacher_id).cloned();
            assemble(
                session,
                class_name,
                course_name,
                teacher_email,
                tags.remove(&id).unwrap_or_default(),
                counts.get(&id).copied().unwrap_or(0),
                joined.contains(&id),
                now,
            )
        })
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    session: Session,
    class_name: Option<String>,
    course_name: Option<String>,
    teacher_email: Option<String>,
    tags: Vec<crate::models::catalog::entities::Tag>,
    participant_count: i64,
    has_joined: bool,
    now: DateTime<Utc>,
) -> SessionOverview {
    let time_remaining = TimeRemaining::compute(session.expires_at, now);
    SessionOverview {
        is_expired: session.is_expired_at(now),
        time_remaining_label: time_remaining.to_string(),
        time_remaining,
        session,
        class_name,
        course_name,
        teacher_email,
        tags,
        participant_count,
        has_joined,
    }
}

fn unique(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            id: 7,
            name: "Week 3".into(),
            description: None,
            teacher_id: 1,
            class_id: 2,
            course_id: Some(3),
            expires_at,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_expired_session() {
        let now = Utc::now();
        let overview = assemble(
            session(Some(now - Duration::minutes(1))),
            Some("7A".into()),
            None,
            None,
            Vec::new(),
            4,
            true,
            now,
        );
        assert!(overview.is_expired);
        assert_eq!(overview.time_remaining, TimeRemaining::Expired);
        assert_eq!(overview.time_remaining_label, "Expired");
        assert_eq!(overview.participant_count, 4);
    }

    #[test]
    fn test_assemble_label_matches_remaining() {
        let now = Utc::now();
        let overview = assemble(
            session(Some(now + Duration::minutes(45) + Duration::seconds(30))),
            None,
            None,
            None,
            Vec::new(),
            0,
            false,
            now,
        );
        assert!(!overview.is_expired);
        assert_eq!(overview.time_remaining_label, "45m remaining");
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        assert_eq!(unique([3, 1, 3, 2, 1].into_iter()), vec![3, 1, 2]);
    }
}
