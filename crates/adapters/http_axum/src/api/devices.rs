//! JSON REST handlers for device configurations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};

use devconf_app::ports::{DeviceRepository, EventPublisher};
use devconf_app::services::device_service::UpdateDevice;
use devconf_domain::device::DeviceSnapshot;
use devconf_domain::error::{DevConfError, NullArgumentError};
use devconf_domain::id::DeviceId;
use devconf_domain::location::Location;
use devconf_domain::opening_hours::OpeningHours;
use devconf_domain::ownership::Ownership;
use devconf_domain::settings::SettingsUpdate;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `PUT /api/devices/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub ownership: Option<Ownership>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// Request body for `PATCH /api/devices/{id}`.
///
/// `opening_hours` and `settings` tell an absent field apart from an
/// explicit `null`; the latter is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    #[serde(default)]
    pub ownership: Option<Ownership>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "present")]
    pub opening_hours: Option<Option<OpeningHours>>,
    #[serde(default, deserialize_with = "present")]
    pub settings: Option<Option<SettingsUpdate>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_null<T>(
    value: Option<Option<T>>,
    field: &'static str,
) -> Result<Option<T>, NullArgumentError> {
    match value {
        Some(None) => Err(NullArgumentError { field }),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

impl TryFrom<UpdateDeviceRequest> for UpdateDevice {
    type Error = NullArgumentError;

    fn try_from(req: UpdateDeviceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            ownership: req.ownership,
            location: req.location,
            opening_hours: not_null(req.opening_hours, "opening_hours")?,
            settings: not_null(req.settings, "settings")?,
        })
    }
}

/// Possible responses from the get and update endpoints.
pub enum DeviceResponse {
    Ok(Json<DeviceSnapshot>),
    NotFound,
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

impl From<Option<DeviceSnapshot>> for DeviceResponse {
    fn from(value: Option<DeviceSnapshot>) -> Self {
        value.map_or(Self::NotFound, |snapshot| Self::Ok(Json(snapshot)))
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<DeviceSnapshot>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_id(id: String) -> Result<DeviceId, ApiError> {
    DeviceId::new(id).map_err(|err| ApiError::from(DevConfError::from(err)))
}

/// `GET /api/devices/{id}`
pub async fn get<R, P>(
    State(state): State<AppState<R, P>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let device_id = parse_id(id)?;
    let snapshot = state.device_service.get(&device_id).await?;
    Ok(snapshot.into())
}

/// `PUT /api/devices/{id}`
pub async fn create<R, P>(
    State(state): State<AppState<R, P>>,
    Path(id): Path<String>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let device_id = parse_id(id)?;
    let snapshot = state
        .device_service
        .create_new_device(device_id, req.ownership, req.location)
        .await?;
    Ok(CreateResponse::Created(Json(snapshot)))
}

/// `PATCH /api/devices/{id}`
pub async fn update<R, P>(
    State(state): State<AppState<R, P>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<DeviceResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let device_id = parse_id(id)?;
    let update = UpdateDevice::try_from(req).map_err(DevConfError::from)?;
    let snapshot = state.device_service.update(&device_id, update).await?;
    Ok(snapshot.into())
}
