//! `SQLite` implementation of [`DeviceRepository`].
//!
//! A device spans two tables: one `devices` row carrying the version column,
//! and up to seven `opening_hours` rows. Saves rewrite both inside a single
//! transaction; the `devices` write is guarded by the expected version.

use std::future::Future;
use std::str::FromStr;

use chrono::Weekday;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, Transaction};

use devconf_app::ports::{DeviceRepository, StoredDevice, Version};
use devconf_domain::device::Device;
use devconf_domain::error::{ConflictError, DevConfError};
use devconf_domain::id::DeviceId;
use devconf_domain::location::{Coordinates, Location};
use devconf_domain::opening_hours::{DayTime, OpeningHours};
use devconf_domain::ownership::Ownership;
use devconf_domain::settings::Settings;

use crate::error::StorageError;

const SELECT_DEVICE: &str = "SELECT * FROM devices WHERE device_id = ?";
const SELECT_HOURS: &str =
    "SELECT weekday, kind, open_hour, close_hour FROM opening_hours WHERE device_id = ?";
const INSERT_DEVICE: &str = "INSERT INTO devices (device_id, version, operator, provider, street, house_number, city, postal_code, state, country, longitude, latitude, auto_start, remote_control, billing, reimbursement, show_on_map, public_access) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) ON CONFLICT (device_id) DO NOTHING";
const UPDATE_DEVICE: &str = "UPDATE devices SET version = ?, operator = ?, provider = ?, street = ?, house_number = ?, city = ?, postal_code = ?, state = ?, country = ?, longitude = ?, latitude = ?, auto_start = ?, remote_control = ?, billing = ?, reimbursement = ?, show_on_map = ?, public_access = ? WHERE device_id = ? AND version = ?";
const DELETE_HOURS: &str = "DELETE FROM opening_hours WHERE device_id = ?";
const INSERT_HOURS: &str = "INSERT INTO opening_hours (device_id, weekday, kind, open_hour, close_hour) VALUES (?, ?, ?, ?, ?)";

const OPEN_24H: &str = "open24h";
const CLOSED_24H: &str = "closed24h";
const OPEN_INTERVAL: &str = "open_interval";

/// Columns of one `devices` row, before the opening hours are attached.
struct DeviceRow {
    id: DeviceId,
    version: Version,
    ownership: Ownership,
    location: Option<Location>,
    settings: Settings,
}

fn corrupted(device_id: &str, reason: impl Into<String>) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(StorageError::Corrupted {
        device_id: device_id.to_string(),
        reason: reason.into(),
    }))
}

impl<'r> FromRow<'r, SqliteRow> for DeviceRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_id: String = row.try_get("device_id")?;
        let id = DeviceId::new(raw_id.as_str())
            .map_err(|err| corrupted(&raw_id, err.to_string()))?;
        let version: i64 = row.try_get("version")?;
        let version = u64::try_from(version)
            .map(Version::from_raw)
            .map_err(|_| corrupted(&raw_id, "negative version"))?;

        let ownership = Ownership {
            operator: row.try_get("operator")?,
            provider: row.try_get("provider")?,
        };

        let street: Option<String> = row.try_get("street")?;
        let location = match street {
            None => None,
            Some(street) => Some(read_location(row, &raw_id, street)?),
        };

        let settings = Settings {
            auto_start: row.try_get("auto_start")?,
            remote_control: row.try_get("remote_control")?,
            billing: row.try_get("billing")?,
            reimbursement: row.try_get("reimbursement")?,
            show_on_map: row.try_get("show_on_map")?,
            public_access: row.try_get("public_access")?,
        };

        Ok(Self {
            id,
            version,
            ownership,
            location,
            settings,
        })
    }
}

fn read_location(
    row: &SqliteRow,
    device_id: &str,
    street: String,
) -> Result<Location, sqlx::Error> {
    let text = |column: &'static str| -> Result<String, sqlx::Error> {
        row.try_get::<Option<String>, _>(column)?
            .ok_or_else(|| corrupted(device_id, format!("location without {column}")))
    };
    let number = |column: &'static str| -> Result<f64, sqlx::Error> {
        row.try_get::<Option<f64>, _>(column)?
            .ok_or_else(|| corrupted(device_id, format!("location without {column}")))
    };

    Ok(Location {
        street,
        house_number: text("house_number")?,
        city: text("city")?,
        postal_code: text("postal_code")?,
        state: text("state")?,
        country: text("country")?,
        coordinates: Coordinates::new(number("longitude")?, number("latitude")?),
    })
}

/// One `opening_hours` row.
struct HoursRow(Weekday, DayTime);

impl<'r> FromRow<'r, SqliteRow> for HoursRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let weekday: String = row.try_get("weekday")?;
        let weekday =
            Weekday::from_str(&weekday).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let kind: String = row.try_get("kind")?;
        let day = match kind.as_str() {
            OPEN_24H => DayTime::Open24h,
            CLOSED_24H => DayTime::Closed24h,
            OPEN_INTERVAL => {
                let open: i64 = row.try_get("open_hour")?;
                let close: i64 = row.try_get("close_hour")?;
                let hour = |value: i64| {
                    u8::try_from(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
                };
                DayTime::interval(hour(open)?, hour(close)?)
                    .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            }
            other => {
                return Err(sqlx::Error::Decode(
                    format!("unknown opening hours kind {other:?}").into(),
                ));
            }
        };
        Ok(Self(weekday, day))
    }
}

fn day_columns(day: DayTime) -> (&'static str, Option<i64>, Option<i64>) {
    match day {
        DayTime::Open24h => (OPEN_24H, None, None),
        DayTime::Closed24h => (CLOSED_24H, None, None),
        DayTime::OpenInterval { open, close } => {
            (OPEN_INTERVAL, Some(i64::from(open)), Some(i64::from(close)))
        }
    }
}

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert or update the `devices` row. Returns the number of rows written,
/// zero meaning the expected version did not match.
async fn write_device(
    tx: &mut Transaction<'_, Sqlite>,
    device: &Device,
    expected: Option<Version>,
    version: Version,
) -> Result<u64, sqlx::Error> {
    let ownership = device.ownership();
    let location = device.location();
    let settings = device.settings();

    let query = match expected {
        None => sqlx::query(INSERT_DEVICE)
            .bind(device.id().as_str())
            .bind(version.get().cast_signed()),
        Some(_) => sqlx::query(UPDATE_DEVICE).bind(version.get().cast_signed()),
    };
    let query = query
        .bind(ownership.operator())
        .bind(ownership.provider())
        .bind(location.map(|l| l.street.as_str()))
        .bind(location.map(|l| l.house_number.as_str()))
        .bind(location.map(|l| l.city.as_str()))
        .bind(location.map(|l| l.postal_code.as_str()))
        .bind(location.map(|l| l.state.as_str()))
        .bind(location.map(|l| l.country.as_str()))
        .bind(location.map(|l| l.coordinates.longitude))
        .bind(location.map(|l| l.coordinates.latitude))
        .bind(settings.auto_start)
        .bind(settings.remote_control)
        .bind(settings.billing)
        .bind(settings.reimbursement)
        .bind(settings.show_on_map)
        .bind(settings.public_access);
    let query = match expected {
        None => query,
        Some(expected) => query
            .bind(device.id().as_str())
            .bind(expected.get().cast_signed()),
    };

    Ok(query.execute(&mut **tx).await?.rows_affected())
}

async fn write_opening_hours(
    tx: &mut Transaction<'_, Sqlite>,
    device: &Device,
) -> Result<(), sqlx::Error> {
    sqlx::query(DELETE_HOURS)
        .bind(device.id().as_str())
        .execute(&mut **tx)
        .await?;

    for (weekday, day) in device.opening_hours().days() {
        let (kind, open, close) = day_columns(day);
        sqlx::query(INSERT_HOURS)
            .bind(device.id().as_str())
            .bind(weekday.to_string())
            .bind(kind)
            .bind(open)
            .bind(close)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

impl DeviceRepository for SqliteDeviceRepository {
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<StoredDevice>, DevConfError>> + Send {
        let pool = self.pool.clone();
        let id = id.clone();
        async move {
            let row: Option<DeviceRow> = sqlx::query_as(SELECT_DEVICE)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;
            let Some(row) = row else {
                return Ok(None);
            };

            let hours: Vec<HoursRow> = sqlx::query_as(SELECT_HOURS)
                .bind(id.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let opening_hours =
                OpeningHours::from_stored(hours.into_iter().map(|HoursRow(w, d)| (w, d)));

            Ok(Some(StoredDevice {
                device: Device::restore(
                    row.id,
                    row.ownership,
                    row.location,
                    opening_hours,
                    row.settings,
                ),
                version: row.version,
            }))
        }
    }

    fn save(
        &self,
        device: Device,
        expected: Option<Version>,
    ) -> impl Future<Output = Result<StoredDevice, DevConfError>> + Send {
        let pool = self.pool.clone();
        async move {
            let version = expected.map_or_else(Version::initial, Version::next);

            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            let written = write_device(&mut tx, &device, expected, version)
                .await
                .map_err(StorageError::from)?;
            if written == 0 {
                tracing::debug!(device_id = %device.id(), ?expected, "version mismatch");
                // Dropping the transaction rolls it back.
                return Err(ConflictError {
                    device_id: device.id().clone(),
                }
                .into());
            }
            write_opening_hours(&mut tx, &device)
                .await
                .map_err(StorageError::from)?;
            tx.commit().await.map_err(StorageError::from)?;

            Ok(StoredDevice { device, version })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use devconf_domain::settings::SettingsUpdate;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn device_id() -> DeviceId {
        DeviceId::new("EVB-P4562137").unwrap()
    }

    fn location() -> Location {
        Location::builder()
            .street("Rakietowa")
            .house_number("1A")
            .city("Wrocław")
            .postal_code("54-621")
            .state("Dolnośląskie")
            .country("POL")
            .coordinates(16.931_752, 51.092_455)
            .build()
            .unwrap()
    }

    fn configured_device() -> Device {
        let mut device = Device::create(device_id());
        let _ = device
            .assign_to(Some(Ownership::new("OpA", "ProvA")))
            .unwrap();
        let _ = device.update_location(Some(location()));
        let _ = device.update_opening_hours(
            OpeningHours::closed_on_weekends()
                .with_day(Weekday::Wed, DayTime::interval(8, 16).unwrap()),
        );
        let _ =
            device.update_settings(&SettingsUpdate::default().billing(true).show_on_map(true));
        device
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(&device_id()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_preserve_every_field_when_saved_and_loaded() {
        let repo = setup().await;
        let device = configured_device();

        let saved = repo.save(device.clone(), None).await.unwrap();
        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();

        assert_eq!(saved.version, Version::initial());
        assert_eq!(loaded.version, Version::initial());
        assert_eq!(loaded.device, device);
    }

    #[tokio::test]
    async fn should_store_unowned_device_without_location() {
        let repo = setup().await;
        let device = Device::create(device_id());

        repo.save(device.clone(), None).await.unwrap();
        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();

        assert_eq!(loaded.device, device);
        assert!(loaded.device.location().is_none());
    }

    #[tokio::test]
    async fn should_bump_version_when_saved_with_current_version() {
        let repo = setup().await;
        let first = repo.save(Device::create(device_id()), None).await.unwrap();

        let second = repo
            .save(configured_device(), Some(first.version))
            .await
            .unwrap();

        assert_eq!(second.version, first.version.next());
        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();
        assert_eq!(loaded.version, second.version);
        assert_eq!(loaded.device, configured_device());
    }

    #[tokio::test]
    async fn should_fail_with_conflict_when_version_is_stale() {
        let repo = setup().await;
        let first = repo.save(Device::create(device_id()), None).await.unwrap();
        repo.save(configured_device(), Some(first.version))
            .await
            .unwrap();

        let result = repo
            .save(Device::create(device_id()), Some(first.version))
            .await;

        assert!(matches!(result, Err(DevConfError::Conflict(_))));
        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();
        assert_eq!(loaded.device, configured_device());
    }

    #[tokio::test]
    async fn should_fail_with_conflict_when_inserting_existing_device() {
        let repo = setup().await;
        repo.save(Device::create(device_id()), None).await.unwrap();

        let result = repo.save(configured_device(), None).await;

        assert!(matches!(result, Err(DevConfError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_fail_with_conflict_when_updating_missing_device() {
        let repo = setup().await;

        let result = repo
            .save(Device::create(device_id()), Some(Version::initial()))
            .await;

        assert!(matches!(result, Err(DevConfError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_load_always_open_when_no_hours_rows_exist() {
        let repo = setup().await;
        repo.save(configured_device(), None).await.unwrap();
        sqlx::query(DELETE_HOURS)
            .bind(device_id().as_str())
            .execute(&repo.pool)
            .await
            .unwrap();

        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();

        assert_eq!(loaded.device.opening_hours(), &OpeningHours::always_open());
    }

    #[tokio::test]
    async fn should_load_missing_days_as_closed_when_hours_rows_are_sparse() {
        let repo = setup().await;
        repo.save(Device::create(device_id()), None).await.unwrap();
        sqlx::query("DELETE FROM opening_hours WHERE device_id = ? AND weekday != ?")
            .bind(device_id().as_str())
            .bind(Weekday::Mon.to_string())
            .execute(&repo.pool)
            .await
            .unwrap();

        let loaded = repo.find_by_id(&device_id()).await.unwrap().unwrap();
        let hours = loaded.device.opening_hours();

        assert_eq!(hours.day(Weekday::Mon), DayTime::Open24h);
        assert_eq!(hours.day(Weekday::Tue), DayTime::Closed24h);
        assert_eq!(hours.day(Weekday::Sun), DayTime::Closed24h);
    }

    #[tokio::test]
    async fn should_fail_when_hours_kind_is_unknown() {
        let repo = setup().await;
        repo.save(Device::create(device_id()), None).await.unwrap();
        sqlx::query("UPDATE opening_hours SET kind = 'sometimes' WHERE device_id = ?")
            .bind(device_id().as_str())
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.find_by_id(&device_id()).await;

        assert!(matches!(result, Err(DevConfError::Storage(_))));
    }
}
