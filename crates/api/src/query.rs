//! Query-string types for the list endpoints.
//!
//! Every list accepts `limit`, `offset`, `ordering` and `search`; the
//! per-resource structs add their filters. Fields are spelled out rather
//! than flattened because `serde(flatten)` loses number parsing in
//! query strings.

use goalboard_core::listing::parse_id_list;
use goalboard_core::types::{Date, DbId, StatusId};
use goalboard_db::models::category::CategoryFilter;
use goalboard_db::models::comment::CommentFilter;
use goalboard_db::models::goal::GoalFilter;
use goalboard_db::models::page::ListParams;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `GET /board/list` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BoardListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ordering: Option<String>,
}

impl BoardListQuery {
    pub fn into_params(self) -> ListParams {
        ListParams {
            limit: self.limit,
            offset: self.offset,
            ordering: self.ordering,
            search: None,
        }
    }
}

/// `GET /goal_category/list` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    pub board: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ordering: Option<String>,
    pub search: Option<String>,
}

impl CategoryListQuery {
    pub fn into_filter(self) -> CategoryFilter {
        CategoryFilter {
            board_id: self.board,
            list: ListParams {
                limit: self.limit,
                offset: self.offset,
                ordering: self.ordering,
                search: self.search,
            },
        }
    }
}

/// `GET /goal/list` parameters.
///
/// `category`, `status` and `priority` take comma-separated ids
/// (`?status=1,2`).
#[derive(Debug, Default, Deserialize)]
pub struct GoalListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date_gte: Option<Date>,
    pub due_date_lte: Option<Date>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ordering: Option<String>,
    pub search: Option<String>,
}

impl GoalListQuery {
    pub fn into_filter(self) -> AppResult<GoalFilter> {
        Ok(GoalFilter {
            category_ids: id_list::<DbId>("category", self.category.as_deref())?,
            statuses: id_list::<StatusId>("status", self.status.as_deref())?,
            priorities: id_list::<StatusId>("priority", self.priority.as_deref())?,
            due_date_gte: self.due_date_gte,
            due_date_lte: self.due_date_lte,
            list: ListParams {
                limit: self.limit,
                offset: self.offset,
                ordering: self.ordering,
                search: self.search,
            },
        })
    }
}

/// `GET /goal_comment/list` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListQuery {
    pub goal: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ordering: Option<String>,
}

impl CommentListQuery {
    pub fn into_filter(self) -> CommentFilter {
        CommentFilter {
            goal_id: self.goal,
            list: ListParams {
                limit: self.limit,
                offset: self.offset,
                ordering: self.ordering,
                search: None,
            },
        }
    }
}

fn id_list<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> AppResult<Option<Vec<T>>> {
    parse_id_list(raw).map_err(|e| AppError::BadRequest(format!("Invalid `{name}` filter: {e}")))
}
