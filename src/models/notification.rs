use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::models::user::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Value,
    #[serde(default, alias = "isRead", deserialize_with = "lenient")]
    pub read: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /notifications`: array directo o `{ notifications: [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NotificationsResponse {
    List(Vec<Notification>),
    Wrapped { notifications: Vec<Notification> },
}

impl NotificationsResponse {
    pub fn into_notifications(self) -> Vec<Notification> {
        match self {
            NotificationsResponse::List(list) => list,
            NotificationsResponse::Wrapped { notifications } => notifications,
        }
    }
}
