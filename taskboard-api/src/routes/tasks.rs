/// Task endpoints
///
/// All routes here sit behind the auth layer, so every handler receives the
/// authenticated caller as an explicit `CurrentUser` extension and scopes
/// its queries to that owner.
///
/// # Endpoints
///
/// - `GET    /api/tasks` - Filtered list plus global stats
/// - `POST   /api/tasks` - Create a task owned by the caller
/// - `GET    /api/tasks/stats` - Priority and category breakdowns
/// - `GET    /api/tasks/:id` - Read a single task
/// - `PUT    /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Delete
///
/// Per-task routes fetch the row first: a missing id answers 404, an id
/// owned by someone else answers 401 and never returns or mutates the row.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path},
    response::Envelope,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_shared::{
    auth::middleware::CurrentUser,
    models::task::{CreateTask, Priority, Task, UpdateTask},
    query::{CategoryStat, PriorityStat, TaskFilter, TaskSort},
};
use uuid::Uuid;
use validator::Validate;

/// Raw query parameters for the task list
///
/// Kept as strings so bad values produce envelope-shaped 400s instead of
/// axum's plain-text rejections, and so the legacy `"All"` sentinel can be
/// folded into "no filter" before the typed filter is built.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Exact category; `"All"` means no filter
    pub category: Option<String>,

    /// Tri-state completion filter: `"true"` / `"false"` / absent
    pub completed: Option<String>,

    /// Priority filter; `"All"` means no filter
    pub priority: Option<String>,

    /// Case-insensitive substring across title/description/tags
    pub search: Option<String>,

    /// Sort field: `-createdAt` (default), `createdAt`, `dueDate`, `priority`
    pub sort: Option<String>,
}

impl ListTasksQuery {
    /// Builds the typed filter, mapping sentinels and rejecting bad values
    ///
    /// Empty-string parameters mean "no filter", same as absent ones.
    pub fn into_filter(self) -> Result<TaskFilter, ApiError> {
        let category = self.category.filter(|c| !c.is_empty() && c != "All");

        let completed = match self.completed.as_deref() {
            None | Some("") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                return Err(ApiError::BadRequest(format!(
                    "completed must be 'true' or 'false', got '{}'",
                    other
                )))
            }
        };

        let priority = match self.priority.as_deref() {
            None | Some("") | Some("All") => None,
            Some(raw) => Some(raw.parse::<Priority>().map_err(ApiError::BadRequest)?),
        };

        let sort = match self.sort.as_deref() {
            None | Some("") => TaskSort::default(),
            Some(raw) => TaskSort::parse(raw).ok_or_else(|| {
                ApiError::BadRequest(format!("unknown sort field: '{}'", raw))
            })?,
        };

        let search = self.search.filter(|s| !s.is_empty());

        Ok(TaskFilter {
            category,
            completed,
            priority,
            search,
            sort,
        })
    }
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title (required, 1..=100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    /// Optional description (<=500 characters)
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    pub description: Option<String>,

    /// Completion flag (defaults to false)
    pub completed: Option<bool>,

    /// Priority (defaults to medium)
    pub priority: Option<Priority>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Category (defaults to "General")
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    /// Free-text tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update task request (all fields optional)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    pub description: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New category
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

/// Stats breakdown payload for `GET /api/tasks/stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBreakdown {
    /// Per-priority counts (count + completed per priority value)
    pub priority_stats: Vec<PriorityStat>,

    /// Per-category counts, top 5 by descending count
    pub category_stats: Vec<CategoryStat>,
}

/// List the caller's tasks, filtered and sorted
///
/// The stats in the envelope cover the caller's ENTIRE task set, not the
/// filtered subset.
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks?category=Work&completed=false&priority=high&search=report&sort=-createdAt
/// Authorization: Bearer <token>
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Envelope<Vec<Task>>>> {
    let filter = query.into_filter()?;

    let tasks = Task::list(&state.db, current.id, &filter).await?;
    let stats = Task::stats(&state.db, current.id).await?;

    let count = tasks.len();
    Ok(Json(Envelope::list(tasks, count, stats)))
}

/// Create a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Buy groceries", "priority": "high", "tags": ["errand"] }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (e.g. title over 100 characters)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Task>>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        current.id,
        CreateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            category: req.category,
            tags: req.tags,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Envelope::data(task))))
}

/// Read a single task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
/// - `401 Unauthorized`: the task belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Task>>> {
    let task = find_owned_task(&state, id, current.id).await?;
    Ok(Json(Envelope::data(task)))
}

/// Partially update a task
///
/// Only the provided fields change; the ownership check runs before any
/// write, so a cross-owner request never mutates the row.
///
/// # Endpoint
///
/// ```text
/// PUT /api/tasks/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "completed": true }
/// ```
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Envelope<Task>>> {
    req.validate()?;

    find_owned_task(&state, id, current.id).await?;

    let updated = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
            due_date: req.due_date,
            category: req.category,
            tags: req.tags,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(Envelope::data(updated)))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
/// - `401 Unauthorized`: the task belongs to another user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Value>>> {
    find_owned_task(&state, id, current.id).await?;

    Task::delete(&state.db, id).await?;

    Ok(Json(Envelope::data(json!({}))))
}

/// Priority and category breakdowns over the caller's tasks
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks/stats
/// Authorization: Bearer <token>
/// ```
pub async fn task_stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Envelope<StatsBreakdown>>> {
    let priority_stats = Task::priority_breakdown(&state.db, current.id).await?;
    let category_stats = Task::category_breakdown(&state.db, current.id).await?;

    Ok(Json(Envelope::data(StatsBreakdown {
        priority_stats,
        category_stats,
    })))
}

/// Fetches a task and enforces ownership
///
/// 404 when the task does not exist, 401 when it exists but belongs to a
/// different user. The two cases stay distinguishable on purpose.
async fn find_owned_task(state: &AppState, id: Uuid, owner: Uuid) -> Result<Task, ApiError> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if task.user_id != owner {
        return Err(ApiError::Unauthorized("Not authorized".to_string()));
    }

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_shared::query::SortKey;

    fn query(
        category: Option<&str>,
        completed: Option<&str>,
        priority: Option<&str>,
        search: Option<&str>,
        sort: Option<&str>,
    ) -> ListTasksQuery {
        ListTasksQuery {
            category: category.map(String::from),
            completed: completed.map(String::from),
            priority: priority.map(String::from),
            search: search.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_builds_unconstrained_filter() {
        let filter = ListTasksQuery::default().into_filter().unwrap();
        assert!(filter.category.is_none());
        assert!(filter.completed.is_none());
        assert!(filter.priority.is_none());
        assert!(filter.search.is_none());
        assert_eq!(filter.sort, TaskSort::default());
    }

    #[test]
    fn test_all_sentinel_means_no_filter() {
        let filter = query(Some("All"), None, Some("All"), None, None)
            .into_filter()
            .unwrap();
        assert!(filter.category.is_none());
        assert!(filter.priority.is_none());
    }

    #[test]
    fn test_empty_params_mean_no_filter() {
        let filter = query(Some(""), Some(""), Some(""), Some(""), Some(""))
            .into_filter()
            .unwrap();
        assert!(filter.category.is_none());
        assert!(filter.completed.is_none());
        assert!(filter.priority.is_none());
        assert!(filter.search.is_none());
        assert_eq!(filter.sort, TaskSort::default());
    }

    #[test]
    fn test_category_named_like_sentinel_is_case_sensitive() {
        // Only the exact sentinel spelling is special; "all" is a real category
        let filter = query(Some("all"), None, None, None, None)
            .into_filter()
            .unwrap();
        assert_eq!(filter.category.as_deref(), Some("all"));
    }

    #[test]
    fn test_completed_tri_state() {
        let filter = query(None, Some("true"), None, None, None)
            .into_filter()
            .unwrap();
        assert_eq!(filter.completed, Some(true));

        let filter = query(None, Some("false"), None, None, None)
            .into_filter()
            .unwrap();
        assert_eq!(filter.completed, Some(false));

        let err = query(None, Some("yes"), None, None, None).into_filter();
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_priority_parse_and_reject() {
        let filter = query(None, None, Some("high"), None, None)
            .into_filter()
            .unwrap();
        assert_eq!(filter.priority, Some(Priority::High));

        let err = query(None, None, Some("urgent"), None, None).into_filter();
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_sort_parse_and_reject() {
        let filter = query(None, None, None, None, Some("dueDate"))
            .into_filter()
            .unwrap();
        assert_eq!(filter.sort.key, SortKey::DueDate);
        assert!(!filter.sort.descending);

        let err = query(None, None, None, None, Some("title")).into_filter();
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_empty_search_is_dropped() {
        let filter = query(None, None, None, Some(""), None).into_filter().unwrap();
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_create_request_title_bounds() {
        let ok = CreateTaskRequest {
            title: "x".repeat(100),
            description: None,
            completed: None,
            priority: None,
            due_date: None,
            category: None,
            tags: vec![],
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateTaskRequest {
            title: "x".repeat(101),
            description: None,
            completed: None,
            priority: None,
            due_date: None,
            category: None,
            tags: vec![],
        };
        assert!(too_long.validate().is_err());

        let empty = CreateTaskRequest {
            title: String::new(),
            description: None,
            completed: None,
            priority: None,
            due_date: None,
            category: None,
            tags: vec![],
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_create_request_description_bound() {
        let req = CreateTaskRequest {
            title: "ok".to_string(),
            description: Some("d".repeat(501)),
            completed: None,
            priority: None,
            due_date: None,
            category: None,
            tags: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_accepts_partial_bodies() {
        let req = UpdateTaskRequest {
            completed: Some(true),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
