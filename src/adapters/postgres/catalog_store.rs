//! PostgreSQL implementation of CatalogStore.
//!
//! Reads template and group definitions. The engine never writes to these
//! tables.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::catalog::{Category, Group, Question, Template};
use crate::domain::foundation::{
    ApprovalValue, CategoryId, ChecklistType, DomainError, ErrorCode, GroupId, QuestionId,
    TemplateId,
};
use crate::ports::CatalogStore;

/// PostgreSQL implementation of CatalogStore.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgresCatalogStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_questions(
        &self,
        template_id: &TemplateId,
        active_only: bool,
    ) -> Result<Vec<Question>, DomainError> {
        let mut sql = String::from(
            r#"
            SELECT q.id, q.category_id, q.title, q.weight, q.required,
                   q.has_intermediate_approval, q.intermediate_value, q.is_active
            FROM template_questions q
            JOIN template_categories c ON q.category_id = c.id
            WHERE c.template_id = $1
            "#,
        );
        if active_only {
            sql.push_str(" AND q.is_active");
        }
        sql.push_str(" ORDER BY c.sort_order, q.id");

        let rows = sqlx::query(&sql)
            .bind(template_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to fetch template questions: {}", e))
            })?;

        rows.into_iter().map(row_to_question).collect()
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn get_template(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, checklist_type, performance_threshold, is_active
            FROM templates
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch template: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let category_rows = sqlx::query(
            r#"
            SELECT id, title, sort_order
            FROM template_categories
            WHERE template_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch categories: {}", e)))?;

        let questions = self.fetch_questions(id, false).await?;

        let categories: Result<Vec<Category>, DomainError> = category_rows
            .into_iter()
            .map(|row| row_to_category(row, &questions))
            .collect();

        let template = Template::reconstitute(
            *id,
            column(&row, "title")?,
            str_to_checklist_type(&column::<String>(&row, "checklist_type")?)?,
            column(&row, "performance_threshold")?,
            column(&row, "is_active")?,
            categories?,
        );

        Ok(Some(template))
    }

    async fn get_group(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, performance_threshold
            FROM checklist_groups
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch group: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let member_rows = sqlx::query(
            r#"
            SELECT template_id
            FROM group_templates
            WHERE group_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch group members: {}", e)))?;

        let template_ids: Result<Vec<TemplateId>, DomainError> = member_rows
            .into_iter()
            .map(|row| Ok(TemplateId::from_uuid(column(&row, "template_id")?)))
            .collect();

        let weight_rows = sqlx::query(
            r#"
            SELECT template_id, weight
            FROM group_template_weights
            WHERE group_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch group weights: {}", e)))?;

        let mut template_weights = BTreeMap::new();
        for row in weight_rows {
            let template_id = TemplateId::from_uuid(column(&row, "template_id")?);
            template_weights.insert(template_id, column::<f64>(&row, "weight")?);
        }

        Ok(Some(Group::reconstitute(
            *id,
            column(&row, "title")?,
            column(&row, "performance_threshold")?,
            template_ids?,
            template_weights,
        )))
    }

    async fn get_template_questions(
        &self,
        id: &TemplateId,
    ) -> Result<Vec<Question>, DomainError> {
        self.fetch_questions(id, true).await
    }

    async fn templates_exist(
        &self,
        ids: &[TemplateId],
    ) -> Result<Vec<TemplateId>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query("SELECT id FROM templates WHERE id = ANY($1)")
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to check template existence: {}", e))
            })?;

        rows.into_iter()
            .map(|row| Ok(TemplateId::from_uuid(column(&row, "id")?)))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn str_to_checklist_type(s: &str) -> Result<ChecklistType, DomainError> {
    match s {
        "inspection" => Ok(ChecklistType::Inspection),
        "compliance" => Ok(ChecklistType::Compliance),
        "audit" => Ok(ChecklistType::Audit),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid checklist type: {}", s),
        )),
    }
}

fn row_to_question(row: PgRow) -> Result<Question, DomainError> {
    let intermediate_value: f64 = column(&row, "intermediate_value")?;
    Ok(Question::reconstitute(
        QuestionId::from_uuid(column(&row, "id")?),
        CategoryId::from_uuid(column(&row, "category_id")?),
        column(&row, "title")?,
        column(&row, "weight")?,
        column(&row, "required")?,
        column(&row, "has_intermediate_approval")?,
        ApprovalValue::try_new(intermediate_value).map_err(|_| {
            DomainError::database(format!(
                "Invalid intermediate value in catalog: {}",
                intermediate_value
            ))
        })?,
        column(&row, "is_active")?,
    ))
}

fn row_to_category(row: PgRow, questions: &[Question]) -> Result<Category, DomainError> {
    let id = CategoryId::from_uuid(column(&row, "id")?);
    let owned: Vec<Question> = questions
        .iter()
        .filter(|q| q.category_id() == &id)
        .cloned()
        .collect();
    Ok(Category::reconstitute(
        id,
        column(&row, "title")?,
        column(&row, "sort_order")?,
        owned,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_type_round_trips_known_values() {
        assert_eq!(
            str_to_checklist_type("inspection").unwrap(),
            ChecklistType::Inspection
        );
        assert_eq!(
            str_to_checklist_type("compliance").unwrap(),
            ChecklistType::Compliance
        );
        assert_eq!(str_to_checklist_type("audit").unwrap(), ChecklistType::Audit);
    }

    #[test]
    fn unknown_checklist_type_is_rejected() {
        assert!(str_to_checklist_type("maintenance").is_err());
    }
}
