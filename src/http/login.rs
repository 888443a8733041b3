use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Device fingerprint the portal expects from its web client.
const APP_NAME: &str = "info.mashov.students";
const API_VERSION: &str = "3.20210425";
const APP_VERSION: f64 = 3.20210425;
const DEVICE_UUID: &str = "mozilla";
const DEVICE_PLATFORM: &str = "mozilla";
const DEVICE_MANUFACTURER: &str = "linux";
const DEVICE_MODEL: &str = "desktop";
const DEVICE_VERSION: &str = "147.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginBody<'a> {
    pub semel: u32,
    pub year: u32,
    pub username: &'a str,
    pub password: &'a str,
    #[serde(rename = "IsBiometric")]
    pub is_biometric: bool,
    pub app_name: &'static str,
    pub api_version: &'static str,
    pub app_version: f64,
    pub app_build: f64,
    pub device_uuid: &'static str,
    pub device_platform: &'static str,
    pub device_manufacturer: &'static str,
    pub device_model: &'static str,
    pub device_version: &'static str,
}

impl<'a> LoginBody<'a> {
    pub fn new(username: &'a str, password: &'a str, semel: u32, year: u32) -> Self {
        Self {
            semel,
            year,
            username,
            password,
            is_biometric: false,
            app_name: APP_NAME,
            api_version: API_VERSION,
            app_version: APP_VERSION,
            app_build: APP_VERSION,
            device_uuid: DEVICE_UUID,
            device_platform: DEVICE_PLATFORM,
            device_manufacturer: DEVICE_MANUFACTURER,
            device_model: DEVICE_MODEL,
            device_version: DEVICE_VERSION,
        }
    }
}

/// The decoded login response. `SessionInfo::default()` stands in for "no session".
///
/// Only the ids are read by the client. Everything else is kept as sent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionInfo {
    #[serde(deserialize_with = "lenient_id")]
    pub session_id: Option<String>,
    pub credential: Option<Credential>,
    /// User and school settings block.
    pub access_token: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionInfo {
    pub fn is_empty(&self) -> bool {
        *self == SessionInfo::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credential {
    #[serde(deserialize_with = "lenient_id")]
    pub session_id: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub user_id: Option<String>,

    /// Display name, institution, user type and the rest of the block.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads an id sent as a string or a number. Anything else counts as absent.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}
