//! Repository for the `goal_categories` table, including the category
//! destroy cascade.

use goalboard_core::listing::{
    clamp_limit, clamp_offset, search_pattern, OrderingSpec, DEFAULT_LIMIT, MAX_LIMIT,
};
use goalboard_core::status::GoalStatus;
use goalboard_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::models::category::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::models::page::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, board_id, user_id, is_deleted, created_at, updated_at";

/// Same columns, qualified for the joined visibility queries.
const C_COLUMNS: &str =
    "c.id, c.title, c.board_id, c.user_id, c.is_deleted, c.created_at, c.updated_at";

/// Live categories on live boards the user participates in. `$1` = user id.
const VISIBLE_FROM: &str = "FROM goal_categories c
     JOIN boards b ON b.id = c.board_id
     JOIN board_participants bp ON bp.board_id = b.id AND bp.user_id = $1
     WHERE c.is_deleted = FALSE AND b.is_deleted = FALSE";

/// List filters. `$2` = board id, `$3` = title search pattern.
const FILTERS: &str = "AND ($2::bigint IS NULL OR c.board_id = $2)
     AND ($3::text IS NULL OR c.title ILIKE $3)";

const ORDERING: OrderingSpec = OrderingSpec {
    allowed: &[("title", "c.title"), ("created", "c.created_at")],
    default: "title",
    tiebreak: "c.id",
};

/// Provides scoped CRUD operations for goal categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category created by `user_id`.
    ///
    /// The caller has already checked write access to `input.board_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO goal_categories (title, board_id, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.title)
            .bind(input.board_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List live categories on boards the user participates in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &CategoryFilter,
    ) -> Result<Page<Category>, sqlx::Error> {
        let limit = clamp_limit(filter.list.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(filter.list.offset);
        let order_by = ORDERING.order_by(filter.list.ordering.as_deref());

        let count_query = format!("SELECT COUNT(*) {VISIBLE_FROM} {FILTERS}");
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&count_query), user_id, filter)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {C_COLUMNS} {VISIBLE_FROM} {FILTERS}
             ORDER BY {order_by} LIMIT $4 OFFSET $5"
        );
        let results = bind_filter(sqlx::query_as::<_, Category>(&query), user_id, filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page { count, results })
    }

    /// Find a live category on a board the user participates in.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {C_COLUMNS} {VISIBLE_FROM} AND c.id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE goal_categories SET title = COALESCE($2, title)
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a category and archive every goal in it, atomically.
    ///
    /// Returns `None` (and changes nothing) if the category is missing or
    /// already deleted.
    pub async fn soft_delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let category = Self::soft_delete_cascade_in(&mut tx, id).await?;
        if category.is_some() {
            tx.commit().await?;
        }
        Ok(category)
    }

    /// The cascade body, run on a caller-owned connection or transaction.
    ///
    /// Callers are responsible for committing.
    pub async fn soft_delete_cascade_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE goal_categories SET is_deleted = TRUE
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(category) = category else {
            return Ok(None);
        };

        let goals = sqlx::query("UPDATE goals SET status = $2 WHERE category_id = $1 AND status <> $2")
            .bind(id)
            .bind(GoalStatus::Archived.id())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        tracing::info!(
            category_id = id,
            board_id = category.board_id,
            goals_archived = goals,
            "Category soft-deleted with cascade"
        );

        Ok(Some(category))
    }
}

/// Bind `$1`..`$3`, shared by the count and page queries.
fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    user_id: DbId,
    filter: &CategoryFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(user_id)
        .bind(filter.board_id)
        .bind(search_pattern(filter.list.search.as_deref()))
}
