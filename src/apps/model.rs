/**
 * App Model
 *
 * An App is an owner-scoped deployable project. The owner is required,
 * forced to the authenticated requester on create, and immutable after.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// App delivery type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    Web,
    Mobile,
}

impl AppType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "web" => Some(Self::Web),
            "mobile" => Some(Self::Mobile),
            _ => None,
        }
    }
}

/// App implementation framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    ServerRendered,
    NativeMobile,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerRendered => "server_rendered",
            Self::NativeMobile => "native_mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "server_rendered" => Some(Self::ServerRendered),
            "native_mobile" => Some(Self::NativeMobile),
            _ => None,
        }
    }
}

/// App record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: Uuid,
    /// Owning user; visible/mutable only by them
    pub user_id: Uuid,
    pub domain_name: String,
    pub name: String,
    pub app_type: AppType,
    pub framework: Framework,
    pub description: String,
    pub screenshot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload
///
/// Deliberately carries no owner field: the owner is pinned by the
/// ownership policy, never read from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPayload {
    pub domain_name: String,
    pub name: String,
    pub app_type: AppType,
    pub framework: Framework,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub screenshot: Option<String>,
}

/// Partial-update payload (PATCH)
///
/// `screenshot` is nullable, so its absence and an explicit `null` must
/// stay distinguishable: absent keeps the current value, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppPatch {
    pub domain_name: Option<String>,
    pub name: Option<String>,
    pub app_type: Option<AppType>,
    pub framework: Option<Framework>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub screenshot: Option<Option<String>>,
}

impl AppPatch {
    /// Merge this patch onto the current record, yielding a full payload
    pub fn apply_to(&self, current: &App) -> AppPayload {
        AppPayload {
            domain_name: self.domain_name.clone().unwrap_or_else(|| current.domain_name.clone()),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            app_type: self.app_type.unwrap_or(current.app_type),
            framework: self.framework.unwrap_or(current.framework),
            description: self.description.clone().unwrap_or_else(|| current.description.clone()),
            screenshot: self.screenshot.clone().unwrap_or_else(|| current.screenshot.clone()),
        }
    }
}
