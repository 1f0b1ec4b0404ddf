//! Program composition workflows.
//!
//! A program owns its levels, which own their activities, which own their
//! repeat days; disease/goal links are owned join rows. This module is the
//! sole writer of that tree. Every multi-row operation runs inside a
//! single transaction: either the whole tree mutation commits, or the
//! transaction is dropped and rolled back, so no partial tree is ever
//! visible. Enum parsing happens inside the transaction so an invalid
//! value on the last activity discards everything inserted before it.
//!
//! Deletion is participation-gated: a program or activity with recorded
//! participants is deactivated in place; one without is hard-deleted, with
//! the cascade spelled out here rather than delegated to `ON DELETE
//! CASCADE` (the tree foreign keys have none).

use sqlx::PgPool;
use uuid::Uuid;
use vitaplan_core::enums::{ActivityType, WeekDay};
use vitaplan_core::error::CoreError;
use vitaplan_core::types::DbId;

use crate::error::DbResult;
use crate::models::activity::{
    ActivityWithRepeatDays, CreateActivityRequest, UpdateActivityRequest,
};
use crate::models::expert::Expert;
use crate::models::level::{CreateLevelRequest, Level, LevelWithActivities};
use crate::models::program::{
    CreateProgramRequest, Program, ProgramWithTree, UpdateProgramRequest,
};
use crate::repositories::{
    ActivityRepo, ExpertRepo, LevelRepo, ParticipationRepo, ProgramDiseaseRepo, ProgramGoalRepo,
    ProgramRepo, RepeatDayRepo, ScheduleRepo,
};

/// How a participation-gated delete resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Participants exist: the row was kept and `is_active` flipped off.
    Deactivated,
    /// No participants: the row (and its owned children) were removed.
    Deleted,
}

/// Orchestrates create/update/delete of the program tree.
pub struct ProgramComposer;

impl ProgramComposer {
    /// Create a program together with its full tree of levels, activities,
    /// repeat days, and disease/goal links, all in one transaction.
    ///
    /// The acting user must have an expert profile; the new program is
    /// owned by it. Parent rows are inserted before children because the
    /// children carry foreign keys to the freshly allocated identities.
    pub async fn create_program(
        pool: &PgPool,
        acting_user_id: DbId,
        input: &CreateProgramRequest,
    ) -> DbResult<Program> {
        let expert = Self::resolve_acting_expert(pool, acting_user_id).await?;

        let mut tx = pool.begin().await?;

        let program_id = Uuid::new_v4();
        let program =
            ProgramRepo::insert_in_tx(&mut tx, program_id, expert.expert_id, input).await?;

        ProgramDiseaseRepo::insert_many_in_tx(&mut tx, program_id, &input.disease_ids).await?;
        ProgramGoalRepo::insert_many_in_tx(&mut tx, program_id, &input.goal_ids).await?;

        for level in &input.levels {
            let level_id = Uuid::new_v4();
            LevelRepo::insert_in_tx(
                &mut tx,
                level_id,
                program_id,
                &level.name,
                level.description.as_deref(),
                level.point_require,
            )
            .await?;

            for activity in &level.activities {
                let activity_type = ActivityType::parse(&activity.activity_type)?;
                let repeat_days = parse_repeat_days(&activity.repeat_days)?;

                let activity_id = Uuid::new_v4();
                ActivityRepo::insert_in_tx(
                    &mut tx,
                    activity_id,
                    level_id,
                    &activity.title,
                    activity.description.as_deref(),
                    activity.duration,
                    activity.point_reward,
                    activity_type.as_str(),
                )
                .await?;
                RepeatDayRepo::insert_many_in_tx(&mut tx, activity_id, &repeat_days).await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            program_id = %program.program_id,
            levels = input.levels.len(),
            "program tree created"
        );
        Ok(program)
    }

    /// Update a program's scalar fields and replace its disease/goal sets,
    /// atomically. An empty ID list yields an empty set, not "unchanged".
    ///
    /// Only the owning expert may update. Concurrent updates to the same
    /// program are last-write-wins at the row level; there is no version
    /// column.
    pub async fn update_program(
        pool: &PgPool,
        program_id: DbId,
        acting_user_id: DbId,
        input: &UpdateProgramRequest,
    ) -> DbResult<Program> {
        let expert = Self::resolve_acting_expert(pool, acting_user_id).await?;
        let program = Self::resolve_program(pool, program_id).await?;
        assert_ownership(&expert, &program)?;

        let mut tx = pool.begin().await?;

        ProgramDiseaseRepo::replace_in_tx(&mut tx, program_id, &input.disease_ids).await?;
        ProgramGoalRepo::replace_in_tx(&mut tx, program_id, &input.goal_ids).await?;

        let updated = ProgramRepo::update_scalars_in_tx(&mut tx, program_id, input)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Program",
                id: program_id,
            })?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete or deactivate a program, depending on participation.
    ///
    /// With enrolled users the program is deactivated in a single
    /// statement. Without any, the whole owned tree is removed in one
    /// transaction: schedules, repeat days, activities, levels, disease
    /// and goal links, then the program row. A failed participation count
    /// aborts the operation; deletion is never attempted on a guess.
    pub async fn delete_program(
        pool: &PgPool,
        acting_user_id: DbId,
        program_id: DbId,
    ) -> DbResult<DeleteOutcome> {
        let expert = Self::resolve_acting_expert(pool, acting_user_id).await?;
        let program = Self::resolve_program(pool, program_id).await?;
        assert_ownership(&expert, &program)?;

        let participants = ParticipationRepo::count_by_program(pool, program_id).await?;
        if participants > 0 {
            ProgramRepo::deactivate(pool, program_id).await?;
            tracing::info!(%program_id, participants, "program deactivated");
            return Ok(DeleteOutcome::Deactivated);
        }

        let mut tx = pool.begin().await?;
        ScheduleRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        RepeatDayRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        ActivityRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        LevelRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        ProgramDiseaseRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        ProgramGoalRepo::delete_by_program_in_tx(&mut tx, program_id).await?;
        ProgramRepo::delete_in_tx(&mut tx, program_id).await?;
        tx.commit().await?;

        tracing::info!(%program_id, "program hard-deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Create a level under an existing program.
    pub async fn create_level(pool: &PgPool, input: &CreateLevelRequest) -> DbResult<Level> {
        let program = Self::resolve_program(pool, input.program_id).await?;

        let level = LevelRepo::insert(
            pool,
            Uuid::new_v4(),
            program.program_id,
            &input.name,
            input.description.as_deref(),
            input.point_require,
        )
        .await?;
        Ok(level)
    }

    /// Create an activity under an existing level, with its repeat days,
    /// in one transaction. Enum parsing failures roll back the insert.
    pub async fn create_activity(
        pool: &PgPool,
        input: &CreateActivityRequest,
    ) -> DbResult<ActivityWithRepeatDays> {
        let level = LevelRepo::find_by_id(pool, input.level_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Level",
                id: input.level_id,
            })?;

        let mut tx = pool.begin().await?;

        let activity_type = ActivityType::parse(&input.activity_type)?;
        let repeat_days = parse_repeat_days(&input.repeat_days)?;

        let activity_id = Uuid::new_v4();
        let activity = ActivityRepo::insert_in_tx(
            &mut tx,
            activity_id,
            level.level_id,
            &input.title,
            input.description.as_deref(),
            input.duration,
            input.point_reward,
            activity_type.as_str(),
        )
        .await?;
        RepeatDayRepo::insert_many_in_tx(&mut tx, activity_id, &repeat_days).await?;

        tx.commit().await?;

        Ok(ActivityWithRepeatDays {
            activity,
            repeat_days: repeat_days.iter().map(|d| d.as_str().to_string()).collect(),
        })
    }

    /// Update an activity's scalars and replace its repeat-day set
    /// (delete-all, insert new), atomically.
    pub async fn update_activity(
        pool: &PgPool,
        activity_id: DbId,
        input: &UpdateActivityRequest,
    ) -> DbResult<ActivityWithRepeatDays> {
        Self::resolve_activity(pool, activity_id).await?;

        let mut tx = pool.begin().await?;

        let activity_type = match &input.activity_type {
            Some(raw) => Some(ActivityType::parse(raw)?),
            None => None,
        };
        let repeat_days = parse_repeat_days(&input.repeat_days)?;

        let activity = ActivityRepo::update_in_tx(
            &mut tx,
            activity_id,
            input.title.as_deref(),
            input.description.as_deref(),
            input.duration,
            input.point_reward,
            activity_type.map(|t| t.as_str()),
        )
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Activity",
            id: activity_id,
        })?;

        RepeatDayRepo::replace_in_tx(&mut tx, activity_id, &repeat_days).await?;

        tx.commit().await?;

        Ok(ActivityWithRepeatDays {
            activity,
            repeat_days: repeat_days.iter().map(|d| d.as_str().to_string()).collect(),
        })
    }

    /// Delete or deactivate an activity, depending on participation.
    /// Same branching as [`Self::delete_program`], one tier down.
    pub async fn delete_activity(pool: &PgPool, activity_id: DbId) -> DbResult<DeleteOutcome> {
        Self::resolve_activity(pool, activity_id).await?;

        let participants = ParticipationRepo::count_by_activity(pool, activity_id).await?;
        if participants > 0 {
            ActivityRepo::deactivate(pool, activity_id).await?;
            return Ok(DeleteOutcome::Deactivated);
        }

        let mut tx = pool.begin().await?;
        ScheduleRepo::delete_by_activity_in_tx(&mut tx, activity_id).await?;
        RepeatDayRepo::delete_by_activity_in_tx(&mut tx, activity_id).await?;
        ActivityRepo::delete_in_tx(&mut tx, activity_id).await?;
        tx.commit().await?;

        Ok(DeleteOutcome::Deleted)
    }

    /// Load a program with its full owned tree, for detail responses.
    pub async fn load_tree(pool: &PgPool, program_id: DbId) -> DbResult<ProgramWithTree> {
        let program = Self::resolve_program(pool, program_id).await?;

        let disease_ids = ProgramDiseaseRepo::list_ids_by_program(pool, program_id).await?;
        let goal_ids = ProgramGoalRepo::list_ids_by_program(pool, program_id).await?;

        let mut levels = Vec::new();
        for level in LevelRepo::list_by_program(pool, program_id).await? {
            let mut activities = Vec::new();
            for activity in ActivityRepo::list_by_level(pool, level.level_id).await? {
                let repeat_days = RepeatDayRepo::list_by_activity(pool, activity.activity_id)
                    .await?
                    .into_iter()
                    .map(|d| d.repeat_day)
                    .collect();
                activities.push(ActivityWithRepeatDays {
                    activity,
                    repeat_days,
                });
            }
            levels.push(LevelWithActivities { level, activities });
        }

        Ok(ProgramWithTree {
            program,
            disease_ids,
            goal_ids,
            levels,
        })
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Resolve the expert profile behind an acting user id.
    pub async fn resolve_acting_expert(pool: &PgPool, acting_user_id: DbId) -> DbResult<Expert> {
        let expert = ExpertRepo::find_by_account_id(pool, acting_user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Expert",
                id: acting_user_id,
            })?;
        Ok(expert)
    }

    async fn resolve_program(pool: &PgPool, program_id: DbId) -> DbResult<Program> {
        let program = ProgramRepo::find_by_id(pool, program_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Program",
                id: program_id,
            })?;
        Ok(program)
    }

    async fn resolve_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> DbResult<crate::models::activity::Activity> {
        let activity = ActivityRepo::find_by_id(pool, activity_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Activity",
                id: activity_id,
            })?;
        Ok(activity)
    }
}

/// Ownership gate: only the creating expert may mutate a program.
fn assert_ownership(expert: &Expert, program: &Program) -> Result<(), CoreError> {
    if program.created_by != expert.expert_id {
        return Err(CoreError::Forbidden(
            "expert does not own this program".to_string(),
        ));
    }
    Ok(())
}

/// Parse raw weekday strings, rejecting the whole list on the first
/// unknown value. Duplicates pass through unchanged.
fn parse_repeat_days(raw: &[String]) -> Result<Vec<WeekDay>, CoreError> {
    raw.iter().map(|day| WeekDay::parse(day)).collect()
}
