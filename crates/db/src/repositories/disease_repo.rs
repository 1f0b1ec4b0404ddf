//! Repository for the `diseases` catalog table.

use sqlx::PgPool;
use vitaplan_core::paging::Paging;
use vitaplan_core::types::DbId;

use crate::models::disease::Disease;

pub struct DiseaseRepo;

impl DiseaseRepo {
    /// List diseases by name. Fills in `paging.total`.
    pub async fn list(pool: &PgPool, paging: &mut Paging) -> Result<Vec<Disease>, sqlx::Error> {
        paging.normalize();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM diseases")
            .fetch_one(pool)
            .await?;
        paging.total = total;

        sqlx::query_as::<_, Disease>(
            "SELECT disease_id, name FROM diseases ORDER BY name OFFSET $1 LIMIT $2",
        )
        .bind(paging.offset())
        .bind(paging.limit)
        .fetch_all(pool)
        .await
    }

    /// Diseases linked to a program via its join rows.
    pub async fn list_by_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<Disease>, sqlx::Error> {
        sqlx::query_as::<_, Disease>(
            "SELECT d.disease_id, d.name
             FROM diseases d
             JOIN program_diseases pd ON pd.disease_id = d.disease_id
             WHERE pd.program_id = $1
             ORDER BY d.name",
        )
        .bind(program_id)
        .fetch_all(pool)
        .await
    }
}
