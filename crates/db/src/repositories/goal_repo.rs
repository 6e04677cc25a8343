//! Repository for the `goals` table.
//!
//! Goals are never removed: destroy moves them to `archived`, which hides
//! them from every scoped query here.

use goalboard_core::listing::{
    clamp_limit, clamp_offset, search_pattern, OrderingSpec, DEFAULT_LIMIT, MAX_LIMIT,
};
use goalboard_core::status::{GoalPriority, GoalStatus};
use goalboard_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::models::goal::{CreateGoal, Goal, GoalFilter, UpdateGoal};
use crate::models::page::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category_id, user_id, status, priority, \
    due_date, created_at, updated_at";

/// Same columns, qualified for the joined visibility queries.
const G_COLUMNS: &str = "g.id, g.title, g.description, g.category_id, g.user_id, g.status, \
    g.priority, g.due_date, g.created_at, g.updated_at";

/// Non-archived goals in live categories on live boards the user
/// participates in. `$1` = user id, `$2` = archived status.
const VISIBLE_FROM: &str = "FROM goals g
     JOIN goal_categories c ON c.id = g.category_id
     JOIN boards b ON b.id = c.board_id
     JOIN board_participants bp ON bp.board_id = b.id AND bp.user_id = $1
     WHERE g.status <> $2 AND c.is_deleted = FALSE AND b.is_deleted = FALSE";

/// List filters, `$3`..`$8`.
const FILTERS: &str = "AND ($3::bigint[] IS NULL OR g.category_id = ANY($3))
     AND ($4::smallint[] IS NULL OR g.status = ANY($4))
     AND ($5::smallint[] IS NULL OR g.priority = ANY($5))
     AND ($6::date IS NULL OR g.due_date >= $6)
     AND ($7::date IS NULL OR g.due_date <= $7)
     AND ($8::text IS NULL OR g.title ILIKE $8 OR g.description ILIKE $8)";

const ORDERING: OrderingSpec = OrderingSpec {
    allowed: &[
        ("due_date", "g.due_date"),
        ("priority", "g.priority"),
        ("title", "g.title"),
        ("created", "g.created_at"),
    ],
    default: "-priority,due_date",
    tiebreak: "g.id",
};

/// Provides scoped CRUD operations for goals.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a new goal created by `user_id`.
    ///
    /// `status` and `priority` are the validated values (defaults applied by
    /// the caller). Write access to the category was checked by the caller.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGoal,
        status: GoalStatus,
        priority: GoalPriority,
    ) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO goals (title, description, category_id, user_id, status, priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(user_id)
            .bind(status.id())
            .bind(priority.id())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// List visible goals. Archived goals are never returned, even when the
    /// `statuses` filter asks for them.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &GoalFilter,
    ) -> Result<Page<Goal>, sqlx::Error> {
        let limit = clamp_limit(filter.list.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(filter.list.offset);
        let order_by = ORDERING.order_by(filter.list.ordering.as_deref());

        let count_query = format!("SELECT COUNT(*) {VISIBLE_FROM} {FILTERS}");
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&count_query), user_id, filter)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {G_COLUMNS} {VISIBLE_FROM} {FILTERS}
             ORDER BY {order_by} LIMIT $9 OFFSET $10"
        );
        let results = bind_filter(sqlx::query_as::<_, Goal>(&query), user_id, filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page { count, results })
    }

    /// Find a visible goal by id.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {G_COLUMNS} {VISIBLE_FROM} AND g.id = $3");
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .bind(GoalStatus::Archived.id())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a goal by id regardless of status or visibility.
    ///
    /// Archival keeps the row; this is how callers confirm it is still stored.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a goal. Only non-`None` fields in `input` are applied.
    ///
    /// `description` and `due_date` are cleared when sent as `null`. Values
    /// were validated by the caller. Returns `None` if no non-archived row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGoal,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());
        let due_date_provided = input.due_date.is_some();
        let due_date_value = input.due_date.flatten();

        let query = format!(
            "UPDATE goals SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4::text ELSE description END,
                category_id = COALESCE($5, category_id),
                status = COALESCE($6, status),
                priority = COALESCE($7, priority),
                due_date = CASE WHEN $8 THEN $9::date ELSE due_date END
             WHERE id = $1 AND status <> $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description_provided)
            .bind(description_value)
            .bind(input.category_id)
            .bind(input.status)
            .bind(input.priority)
            .bind(due_date_provided)
            .bind(due_date_value)
            .bind(GoalStatus::Archived.id())
            .fetch_optional(pool)
            .await
    }

    /// Archive a goal: a single-row status change, the row is kept.
    ///
    /// Returns `None` if the goal is missing or already archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!(
            "UPDATE goals SET status = $2
             WHERE id = $1 AND status <> $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(GoalStatus::Archived.id())
            .fetch_optional(pool)
            .await
    }
}

/// Bind `$1`..`$8`, shared by the count and page queries.
fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    user_id: DbId,
    filter: &GoalFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(user_id)
        .bind(GoalStatus::Archived.id())
        .bind(filter.category_ids.clone())
        .bind(filter.statuses.clone())
        .bind(filter.priorities.clone())
        .bind(filter.due_date_gte)
        .bind(filter.due_date_lte)
        .bind(search_pattern(filter.list.search.as_deref()))
}
