use crate::entities::{prelude::*, searches};
use crate::models::search::{SearchRecord, SearchSnapshot};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

pub struct SearchRepository {
    conn: DatabaseConnection,
    clock: Arc<UpdateClock>,
}

/// Hands out strictly increasing `updated_at` values for one database, so
/// two writes in the same microsecond still order by write sequence.
#[derive(Debug, Default)]
pub struct UpdateClock {
    last_micros: AtomicI64,
}

impl UpdateClock {
    /// `at`, or one microsecond past the previous stamp if that is later.
    pub fn stamp(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let wanted = at.timestamp_micros();
        let mut last = self.last_micros.load(Ordering::SeqCst);
        loop {
            let next = wanted.max(last.saturating_add(1));
            match self.last_micros.compare_exchange_weak(
                last,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return DateTime::from_timestamp_micros(next).unwrap_or(at),
                Err(actual) => last = actual,
            }
        }
    }
}

/// Fixed-width RFC 3339 so that string ordering in SQLite matches time ordering.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid timestamp in searches table: {raw}"))?
        .with_timezone(&Utc))
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection, clock: Arc<UpdateClock>) -> Self {
        Self { conn, clock }
    }

    /// Inserts the snapshot or overwrites the existing row for the same city.
    /// `created_at` survives the overwrite; `updated_at` is `searched_at`
    /// unless an earlier write already used that instant.
    pub async fn upsert(&self, snapshot: &SearchSnapshot) -> Result<SearchRecord> {
        let searched_at = format_timestamp(snapshot.searched_at);
        let at = format_timestamp(self.clock.stamp(snapshot.searched_at));

        let active_model = searches::ActiveModel {
            city: Set(snapshot.city.clone()),
            temp: Set(snapshot.temp),
            description: Set(snapshot.description.clone()),
            icon: Set(snapshot.icon.clone()),
            timezone: Set(snapshot.timezone),
            searched_at: Set(searched_at),
            created_at: Set(at.clone()),
            updated_at: Set(at),
            ..Default::default()
        };

        Searches::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(searches::Column::City)
                    .update_columns([
                        searches::Column::Temp,
                        searches::Column::Description,
                        searches::Column::Icon,
                        searches::Column::Timezone,
                        searches::Column::SearchedAt,
                        searches::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.get(&snapshot.city)
            .await?
            .with_context(|| format!("Search record for {} vanished after upsert", snapshot.city))
    }

    pub async fn list_recent(&self, limit: u64) -> Result<Vec<SearchRecord>> {
        let rows = Searches::find()
            .order_by_desc(searches::Column::UpdatedAt)
            .order_by_desc(searches::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, city: &str) -> Result<Option<SearchRecord>> {
        let row = Searches::find()
            .filter(searches::Column::City.eq(city))
            .one(&self.conn)
            .await?;

        row.map(Self::map_model).transpose()
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Searches::find().count(&self.conn).await?)
    }

    fn map_model(m: searches::Model) -> Result<SearchRecord> {
        Ok(SearchRecord {
            id: m.id,
            city: m.city,
            temp: m.temp,
            description: m.description,
            icon: m.icon,
            timezone: m.timezone,
            searched_at: parse_timestamp(&m.searched_at)?,
            created_at: parse_timestamp(&m.created_at)?,
            updated_at: parse_timestamp(&m.updated_at)?,
        })
    }
}
