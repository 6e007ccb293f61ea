use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::ProfileId;
use crate::domains::profiles::models::{Preferences, Purpose};

/// Member profile as the engine sees it.
///
/// `distance_miles` is precomputed relative to the current viewer by the
/// geolocation layer; the engine treats it as a materialized attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub display_name: String,
    pub age: i32,
    pub gender: Option<String>,
    pub purpose: Purpose,
    pub bio: String,
    pub location_name: String,
    pub distance_miles: f64,
    pub interests: Vec<String>,
    pub image_urls: Vec<String>,
    pub verified: bool,
}

/// Raw profile row - SQL persistence layer.
///
/// The purpose tag is stored as its display string, list fields and
/// preferences as jsonb.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: ProfileId,
    display_name: String,
    age: i32,
    gender: Option<String>,
    purpose: String,
    bio: String,
    location_name: String,
    distance_miles: f64,
    interests: Json<Vec<String>>,
    image_urls: Json<Vec<String>>,
    verified: bool,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = anyhow::Error;

    fn try_from(row: ProfileRow) -> Result<Self> {
        let purpose = row
            .purpose
            .parse::<Purpose>()
            .with_context(|| format!("profile {} has an invalid purpose tag", row.id))?;

        Ok(Profile {
            id: row.id,
            display_name: row.display_name,
            age: row.age,
            gender: row.gender,
            purpose,
            bio: row.bio,
            location_name: row.location_name,
            distance_miles: row.distance_miles,
            interests: row.interests.0,
            image_urls: row.image_urls.0,
            verified: row.verified,
        })
    }
}

impl Profile {
    /// Read the full profile set in stable enumeration order.
    ///
    /// The selector's tie-break on equal distance is this order, so the
    /// ORDER BY clause is part of the contract.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM profiles ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    /// Find a profile by ID.
    pub async fn find_by_id(id: ProfileId, pool: &PgPool) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    /// Read a viewer's stored preferences, falling back to defaults when the
    /// profile has none yet.
    pub async fn find_preferences(id: ProfileId, pool: &PgPool) -> Result<Preferences> {
        let prefs = sqlx::query_scalar::<_, Json<Preferences>>(
            "SELECT preferences FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(prefs.map(|p| p.0).unwrap_or_default())
    }

    /// Insert or update a profile together with its preferences.
    pub async fn upsert(&self, prefs: &Preferences, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO profiles (
                id, display_name, age, gender, purpose, bio, location_name,
                distance_miles, interests, image_urls, verified, preferences
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT (id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                purpose = EXCLUDED.purpose,
                bio = EXCLUDED.bio,
                location_name = EXCLUDED.location_name,
                distance_miles = EXCLUDED.distance_miles,
                interests = EXCLUDED.interests,
                image_urls = EXCLUDED.image_urls,
                verified = EXCLUDED.verified,
                preferences = EXCLUDED.preferences",
        )
        .bind(self.id)
        .bind(&self.display_name)
        .bind(self.age)
        .bind(&self.gender)
        .bind(self.purpose.as_str())
        .bind(&self.bio)
        .bind(&self.location_name)
        .bind(self.distance_miles)
        .bind(Json(&self.interests))
        .bind(Json(&self.image_urls))
        .bind(self.verified)
        .bind(Json(prefs))
        .execute(pool)
        .await?;

        Ok(())
    }
}
