/// Task filter/sort engine
///
/// Translates an explicit filter specification into the parameterized SQL
/// executed by [`Task::list`](crate::models::task::Task::list), and defines
/// the aggregate statistics shapes returned alongside list results.
///
/// Filters compose conjunctively. The search clause is the one disjunctive
/// piece: a task matches if the needle appears (case-insensitively) in the
/// title, the description, or any tag. Every query is scoped to the owning
/// user before any other clause applies.
///
/// Each filter field models "unset" as `None` rather than a sentinel string,
/// so a legitimate category literally named "All" cannot collide with the
/// no-filter state. Mapping the wire-level `"All"` sentinel to `None` is the
/// HTTP layer's job.

use serde::{Deserialize, Serialize};

use crate::models::task::Priority;

/// Field a task list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Creation timestamp
    CreatedAt,

    /// Due date (tasks without one sort last)
    DueDate,

    /// Priority (low < medium < high, per the enum declaration order)
    Priority,
}

/// Requested ordering for a task list
///
/// Wire format follows the query API: `createdAt`, `dueDate`, `priority`,
/// each optionally prefixed with `-` for descending. The default is
/// `-createdAt` (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    /// Primary sort field
    pub key: SortKey,

    /// Descending order when true
    pub descending: bool,
}

impl Default for TaskSort {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            descending: true,
        }
    }
}

impl TaskSort {
    /// Parses the wire sort parameter (`-createdAt`, `dueDate`, ...)
    ///
    /// Returns `None` for unrecognized fields; callers decide whether that
    /// is a validation error.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        let key = match field {
            "createdAt" => SortKey::CreatedAt,
            "dueDate" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            _ => return None,
        };

        Some(Self { key, descending })
    }

    /// Renders the ORDER BY clause body for this sort
    ///
    /// A single-key sort leaves ties unordered, so every ordering carries a
    /// deterministic tie-break: creation time (newest first) and finally the
    /// row id. Two tasks with the same due date therefore always come back
    /// in the same order.
    pub fn order_by(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };

        match self.key {
            SortKey::CreatedAt => format!("created_at {}, id ASC", dir),
            SortKey::DueDate => {
                format!("due_date {} NULLS LAST, created_at DESC, id ASC", dir)
            }
            SortKey::Priority => format!("priority {}, created_at DESC, id ASC", dir),
        }
    }
}

/// Filter specification for a task list query
///
/// All clauses are optional and independent; `None` means "no constraint".
/// `completed` is the tri-state filter: unset returns both completed and
/// pending tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact category match
    pub category: Option<String>,

    /// Completion flag filter (tri-state)
    pub completed: Option<bool>,

    /// Exact priority match
    pub priority: Option<Priority>,

    /// Case-insensitive substring, OR across title/description/tags
    pub search: Option<String>,

    /// Result ordering
    pub sort: TaskSort,
}

impl TaskFilter {
    /// Builds the full SELECT statement for this filter
    ///
    /// `$1` is always the owner id; the remaining placeholders are assigned
    /// in declaration order (category, completed, priority, search) so the
    /// caller can bind conditionally in the same order. The search
    /// placeholder is reused across the three ILIKE arms.
    pub fn to_select_sql(&self) -> String {
        let mut sql = String::from(
            "SELECT id, title, description, completed, priority, due_date, \
             category, tags, user_id, created_at, updated_at \
             FROM tasks WHERE user_id = $1",
        );

        let mut bind = 1;

        if self.category.is_some() {
            bind += 1;
            sql.push_str(&format!(" AND category = ${}", bind));
        }
        if self.completed.is_some() {
            bind += 1;
            sql.push_str(&format!(" AND completed = ${}", bind));
        }
        if self.priority.is_some() {
            bind += 1;
            sql.push_str(&format!(" AND priority = ${}", bind));
        }
        if self.search.is_some() {
            bind += 1;
            sql.push_str(&format!(
                " AND (title ILIKE ${n} OR COALESCE(description, '') ILIKE ${n} \
                 OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ${n}))",
                n = bind
            ));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(&self.sort.order_by());
        sql
    }

    /// ILIKE pattern for the search needle, with LIKE metacharacters escaped
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_ref()
            .map(|needle| format!("%{}%", escape_like(needle)))
    }
}

/// Escapes `%`, `_`, and `\` so a search needle matches literally
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Aggregate counts over a user's entire task set
///
/// Computed independently of any active filter, so the dashboard totals do
/// not shrink while a filter is applied. `pending_tasks` is always
/// `total_tasks - completed_tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Total number of tasks owned by the user
    pub total_tasks: i64,

    /// Number of completed tasks
    pub completed_tasks: i64,

    /// Number of pending tasks
    pub pending_tasks: i64,
}

/// Per-priority slice of the stats breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PriorityStat {
    /// Priority bucket
    pub priority: Priority,

    /// Tasks with this priority
    pub count: i64,

    /// Completed tasks with this priority
    pub completed: i64,
}

/// Per-category slice of the stats breakdown (top 5 by count)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryStat {
    /// Category name
    pub category: String,

    /// Tasks in this category
    pub count: i64,
}
