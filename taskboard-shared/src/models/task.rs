/// Task model and database operations
///
/// Tasks are exclusively owned by one user. List queries are always scoped
/// by `user_id`; per-task operations (read-single, update, delete) fetch the
/// row first so the caller can distinguish "missing" from "wrong owner".
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(100) NOT NULL,
///     description VARCHAR(500),
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date TIMESTAMPTZ,
///     category TEXT NOT NULL DEFAULT 'General',
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::query::{CategoryStat, PriorityStat, TaskFilter, TaskStats};

/// Task priority level
///
/// The Postgres enum is declared in the same low-to-high order, so
/// `ORDER BY priority` sorts by urgency rather than alphabetically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Wire representation of this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Title (1..=100 characters)
    pub title: String,

    /// Optional free-text description (<=500 characters)
    pub description: Option<String>,

    /// Completion flag
    pub completed: bool,

    /// Priority level
    pub priority: Priority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Category bucket ("General" when unspecified)
    pub category: String,

    /// Free-text tags, in insertion order
    pub tags: Vec<String>,

    /// Owning user
    pub user_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// Unset priority/category fall back to the schema defaults (medium,
/// "General").
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Input for a partial task update
///
/// Only `Some` fields are written; absent fields keep their current value.
/// There is no way to null out a description or due date through this type.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

const TASK_COLUMNS: &str = "id, title, description, completed, priority, due_date, \
                            category, tags, user_id, created_at, updated_at";

impl Task {
    /// Creates a task owned by `user_id`
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, completed, priority, due_date, category, tags, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed.unwrap_or(false))
        .bind(data.priority.unwrap_or(Priority::Medium))
        .bind(data.due_date)
        .bind(data.category.unwrap_or_else(|| "General".to_string()))
        .bind(data.tags)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, regardless of owner
    ///
    /// The caller is responsible for the ownership check; fetching first is
    /// what lets handlers answer 404 for a missing task and 401 for someone
    /// else's task.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks owned by `user_id`, filtered and ordered per `filter`
    ///
    /// The SQL is compiled by [`TaskFilter::to_select_sql`]; binds follow
    /// the filter's declaration order.
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = filter.to_select_sql();
        let mut query = sqlx::query_as::<_, Task>(&sql).bind(user_id);

        if let Some(ref category) = filter.category {
            query = query.bind(category.clone());
        }
        if let Some(completed) = filter.completed {
            query = query.bind(completed);
        }
        if let Some(priority) = filter.priority {
            query = query.bind(priority);
        }
        if let Some(pattern) = filter.search_pattern() {
            query = query.bind(pattern);
        }

        query.fetch_all(pool).await
    }

    /// Applies a partial update to a task
    ///
    /// Returns the updated task, or `None` if the task no longer exists.
    /// `updated_at` is always bumped.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET list dynamically from the fields that are present
        let mut sql = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind = 1;

        if data.title.is_some() {
            bind += 1;
            sql.push_str(&format!(", title = ${}", bind));
        }
        if data.description.is_some() {
            bind += 1;
            sql.push_str(&format!(", description = ${}", bind));
        }
        if data.completed.is_some() {
            bind += 1;
            sql.push_str(&format!(", completed = ${}", bind));
        }
        if data.priority.is_some() {
            bind += 1;
            sql.push_str(&format!(", priority = ${}", bind));
        }
        if data.due_date.is_some() {
            bind += 1;
            sql.push_str(&format!(", due_date = ${}", bind));
        }
        if data.category.is_some() {
            bind += 1;
            sql.push_str(&format!(", category = ${}", bind));
        }
        if data.tags.is_some() {
            bind += 1;
            sql.push_str(&format!(", tags = ${}", bind));
        }

        sql.push_str(&format!(" WHERE id = $1 RETURNING {}", TASK_COLUMNS));

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(id);

        if let Some(title) = data.title {
            query = query.bind(title);
        }
        if let Some(description) = data.description {
            query = query.bind(description);
        }
        if let Some(completed) = data.completed {
            query = query.bind(completed);
        }
        if let Some(priority) = data.priority {
            query = query.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            query = query.bind(due_date);
        }
        if let Some(category) = data.category {
            query = query.bind(category);
        }
        if let Some(tags) = data.tags {
            query = query.bind(tags);
        }

        query.fetch_optional(pool).await
    }

    /// Deletes a task by ID
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate counts over ALL of the user's tasks
    ///
    /// Deliberately ignores any active filter so totals stay global.
    pub async fn stats(pool: &PgPool, user_id: Uuid) -> Result<TaskStats, sqlx::Error> {
        let stats = sqlx::query_as::<_, TaskStats>(
            r#"
            SELECT COUNT(*) AS total_tasks,
                   COUNT(*) FILTER (WHERE completed) AS completed_tasks,
                   COUNT(*) FILTER (WHERE NOT completed) AS pending_tasks
            FROM tasks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    /// Groups the user's tasks by priority (count and completed count)
    pub async fn priority_breakdown(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<PriorityStat>, sqlx::Error> {
        sqlx::query_as::<_, PriorityStat>(
            r#"
            SELECT priority,
                   COUNT(*) AS count,
                   COUNT(*) FILTER (WHERE completed) AS completed
            FROM tasks
            WHERE user_id = $1
            GROUP BY priority
            ORDER BY priority
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Groups the user's tasks by category, top 5 by descending count
    ///
    /// Ties are broken by category name so the cut at 5 entries is stable.
    pub async fn category_breakdown(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CategoryStat>, sqlx::Error> {
        sqlx::query_as::<_, CategoryStat>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM tasks
            WHERE user_id = $1
            GROUP BY category
            ORDER BY count DESC, category ASC
            LIMIT 5
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
