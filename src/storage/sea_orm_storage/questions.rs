use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::question_tags::{
    ActiveModel as QuestionTagActiveModel, Column as QuestionTagColumn, Entity as QuestionTags,
};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::entity::tags::{Column as TagColumn, Entity as Tags};
use crate::errors::{QuizRoomError, Result};
use crate::models::catalog::entities::Tag;
use crate::models::questions::{
    entities::{Answer, Question, QuestionDetail, QuestionWithAnswers},
    requests::AnswerInput,
};
use crate::storage::NewQuestion;
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(&self, question: NewQuestion) -> Result<Question> {
        let model = ActiveModel {
            title: Set(question.title),
            content: Set(question.content),
            course_id: Set(question.course_id),
            teacher_id: Set(question.teacher_id),
            image_url: Set(question.image_url),
            image_filename: Set(question.image_filename),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 关联题目标签，返回写入条数
    pub async fn attach_question_tags_impl(
        &self,
        question_id: i64,
        tag_ids: &[i64],
    ) -> Result<usize> {
        let mut attached = 0;

        for tag_id in tag_ids {
            QuestionTagActiveModel {
                question_id: Set(question_id),
                tag_id: Set(*tag_id),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("关联题目标签失败: {e}")))?;
            attached += 1;
        }

        Ok(attached)
    }

    /// 写入答案选项，order_index 即提交顺序
    pub async fn create_answers_impl(
        &self,
        question_id: i64,
        answers: &[AnswerInput],
    ) -> Result<Vec<Answer>> {
        let mut created = Vec::with_capacity(answers.len());

        for (index, answer) in answers.iter().enumerate() {
            let result = AnswerActiveModel {
                question_id: Set(question_id),
                content: Set(answer.content.clone()),
                is_correct: Set(answer.is_correct),
                order_index: Set(index as i32),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建答案失败: {e}")))?;

            created.push(result.into_answer());
        }

        Ok(created)
    }

    /// 列出教师的题目（含课程名与标签），可按标题搜索
    pub async fn list_question_details_by_teacher_impl(
        &self,
        teacher_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<QuestionDetail>> {
        let mut select = Questions::find().filter(Column::TeacherId.eq(teacher_id));

        if let Some(search) = search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        let questions = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目列表失败: {e}")))?;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let mut course_ids: Vec<i64> = questions.iter().map(|q| q.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        // 批量查询课程名称
        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询课程失败: {e}")))?;
        let course_names: HashMap<i64, String> =
            courses.into_iter().map(|c| (c.id, c.name)).collect();

        let tags_by_question = self.load_question_tags(&question_ids).await?;

        Ok(questions
            .into_iter()
            .map(|m| {
                let course_name = course_names.get(&m.course_id).cloned();
                let tags = tags_by_question.get(&m.id).cloned().unwrap_or_default();
                QuestionDetail {
                    question: m.into_question(),
                    course_name,
                    tags,
                }
            })
            .collect())
    }

    /// 批量获取题目，保持传入顺序
    pub async fn list_questions_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = Questions::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目失败: {e}")))?;

        let mut by_id: HashMap<i64, Question> = results
            .into_iter()
            .map(|m| (m.id, m.into_question()))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// 获取题目及其选项（选项按 order_index 排序）
    pub async fn get_question_with_answers_impl(
        &self,
        question_id: i64,
    ) -> Result<Option<QuestionWithAnswers>> {
        let Some(question) = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目失败: {e}")))?
        else {
            return Ok(None);
        };

        let answers = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_asc(AnswerColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(Some(QuestionWithAnswers {
            question: question.into_question(),
            answers: answers.into_iter().map(|m| m.into_answer()).collect(),
        }))
    }

    /// 批量加载题目标签
    async fn load_question_tags(&self, question_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>> {
        let links = QuestionTags::find()
            .filter(QuestionTagColumn::QuestionId.is_in(question_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询题目标签失败: {e}")))?;

        if links.is_empty() {
            return Ok(HashMap::new());
        }

        let mut tag_ids: Vec<i64> = links.iter().map(|l| l.tag_id).collect();
        tag_ids.sort_unstable();
        tag_ids.dedup();

        let tags = Tags::find()
            .filter(TagColumn::Id.is_in(tag_ids))
            .order_by_asc(TagColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询标签失败: {e}")))?;
        let tags_by_id: HashMap<i64, Tag> = tags.into_iter().map(|m| (m.id, m.into_tag())).collect();

        let mut result: HashMap<i64, Vec<Tag>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags_by_id.get(&link.tag_id) {
                result
                    .entry(link.question_id)
                    .or_insert_with(Vec::new)
                    .push(tag.clone());
            }
        }

        Ok(result)
    }
}
