use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::{queries, DbPool};
use crate::error::AppError;
use crate::models::family::{Family, FamilyDetail, FamilyMember};

const JOIN_CODE_LEN: usize = 6;
const JOIN_CODE_ATTEMPTS: usize = 8;

fn generate_join_code() -> String {
    Uuid::new_v4().simple().to_string()[..JOIN_CODE_LEN].to_uppercase()
}

pub async fn create(
    pool: &DbPool,
    person_id: &str,
    person_name: Option<&str>,
    family_name: &str,
) -> Result<Family, AppError> {
    if person_id.is_empty() {
        return Err(AppError::Validation("personId is required".to_string()));
    }
    if family_name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let family = Family {
        id: Uuid::new_v4(),
        name: family_name.to_string(),
        join_code: String::new(),
        admin_id: person_id.to_string(),
        created_at: Utc::now(),
    };

    let mut tx = pool.begin().await?;

    sqlx::query(queries::UPSERT_PERSON)
        .bind(person_id)
        .bind(person_name)
        .execute(&mut *tx)
        .await?;

    // Codes are drawn from a 16^6 space; collisions are rare but the UNIQUE
    // constraint is the source of truth, so retry on violation.
    let mut join_code = None;
    for _ in 0..JOIN_CODE_ATTEMPTS {
        let candidate = generate_join_code();
        let inserted = sqlx::query(queries::INSERT_FAMILY)
            .bind(family.id.to_string())
            .bind(&family.name)
            .bind(&candidate)
            .bind(&family.admin_id)
            .bind(family.created_at)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {
                join_code = Some(candidate);
                break;
            }
            Err(sqlx::Error::Database(db))
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let join_code = join_code.ok_or_else(|| {
        AppError::Database(sqlx::Error::Protocol(
            "could not allocate a unique join code".to_string(),
        ))
    })?;

    sqlx::query(queries::INSERT_FAMILY_MEMBER)
        .bind(family.id.to_string())
        .bind(person_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Created family {} ({}) with admin {}",
        family.id, family.name, family.admin_id
    );

    Ok(Family { join_code, ..family })
}

/// Joining with a code is idempotent: re-joining a group the person already
/// belongs to is a no-op and still returns the group.
pub async fn join(
    pool: &DbPool,
    person_id: &str,
    person_name: Option<&str>,
    code: &str,
) -> Result<Family, AppError> {
    if person_id.is_empty() {
        return Err(AppError::Validation("personId is required".to_string()));
    }

    let family = sqlx::query_as::<_, Family>(queries::SELECT_FAMILY_BY_CODE)
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("invalid join code".to_string()))?;

    let mut tx = pool.begin().await?;

    sqlx::query(queries::UPSERT_PERSON)
        .bind(person_id)
        .bind(person_name)
        .execute(&mut *tx)
        .await?;

    sqlx::query(queries::INSERT_FAMILY_MEMBER)
        .bind(family.id.to_string())
        .bind(person_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Person {} joined family {}", person_id, family.id);

    Ok(family)
}

pub async fn get(pool: &DbPool, id: Uuid) -> Result<Family, AppError> {
    sqlx::query_as::<_, Family>(queries::SELECT_FAMILY)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("family {} not found", id)))
}

pub async fn list_for_person(pool: &DbPool, person_id: &str) -> Result<Vec<Family>, AppError> {
    let families = sqlx::query_as::<_, Family>(queries::SELECT_FAMILIES_FOR_PERSON)
        .bind(person_id)
        .fetch_all(pool)
        .await?;
    Ok(families)
}

pub async fn members(pool: &DbPool, family_id: Uuid) -> Result<Vec<FamilyMember>, AppError> {
    let members = sqlx::query_as::<_, FamilyMember>(queries::SELECT_FAMILY_MEMBERS)
        .bind(family_id.to_string())
        .fetch_all(pool)
        .await?;
    Ok(members)
}

pub async fn detail(pool: &DbPool, family_id: Uuid) -> Result<FamilyDetail, AppError> {
    let family = get(pool, family_id).await?;
    let members = members(pool, family_id).await?;
    Ok(FamilyDetail { family, members })
}
