//! Repository for the `goals` catalog table.

use sqlx::PgPool;
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;

use crate::models::goal::Goal;

pub struct GoalRepo;

impl GoalRepo {
    /// List goals by name. Fills in `paging.total`.
    pub async fn list(pool: &PgPool, paging: &mut Paging) -> Result<Vec<Goal>, sqlx::Error> {
        paging.normalize();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM goals")
            .fetch_one(pool)
            .await?;
        paging.total = total;

        sqlx::query_as::<_, Goal>("SELECT goal_id, name FROM goals ORDER BY name OFFSET $1 LIMIT $2")
            .bind(paging.offset())
            .bind(paging.limit)
            .fetch_all(pool)
            .await
    }

    /// Goals linked to a program via its join rows.
    pub async fn list_by_program(pool: &PgPool, program_id: DbId) -> Result<Vec<Goal>, sqlx::Error> {
        sqlx::query_as::<_, Goal>(
            "SELECT g.goal_id, g.name
             FROM goals g
             JOIN program_goals pg ON pg.goal_id = g.goal_id
             WHERE pg.program_id = $1
             ORDER BY g.name",
        )
        .bind(program_id)
        .fetch_all(pool)
        .await
    }
}
