use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// `null` o un valor con tipo inesperado se leen como `T::default()`.
/// Un campo roto no invalida el registro entero.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

// ============================================================================
// IDENTIDAD
// ============================================================================

/// ID de usuario. El backend lo manda como string o como número.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) if s.trim().is_empty() => Err(serde::de::Error::custom("empty user id")),
            RawId::Text(s) => Ok(UserId(s)),
            RawId::Number(n) => Ok(UserId(n.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rol del usuario. Los valores desconocidos caen en `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "STUDENT", alias = "Student")]
    Student,
    #[serde(alias = "COORDINATOR", alias = "Coordinator")]
    Coordinator,
    #[serde(alias = "ADMIN", alias = "Admin")]
    Admin,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Coordinator => "coordinator",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

// ============================================================================
// SESIÓN (actor autenticado)
// ============================================================================

/// Identidad del usuario autenticado (`GET /users/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: UserId,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Campos adicionales que el backend agregue
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Extrae la identidad de la respuesta del perfil.
    /// Acepta el registro directo o envuelto en `user` / `data`.
    pub fn from_profile_response(body: &Value) -> Option<Session> {
        if let Ok(session) = Session::deserialize(body) {
            return Some(session);
        }
        ["user", "data"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|inner| Session::deserialize(inner).ok())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ============================================================================
// USUARIO (listado externo, solo lectura)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[serde(alias = "ACTIVE", alias = "Active")]
    Active,
    #[serde(alias = "INACTIVE", alias = "Inactive")]
    Inactive,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, deserialize_with = "lenient")]
    pub status: UserStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Respuesta del listado: array directo o envuelto
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UsersResponse {
    List(Vec<UserRecord>),
    Users { users: Vec<UserRecord> },
    Data { data: Vec<UserRecord> },
}

impl UsersResponse {
    pub fn into_users(self) -> Vec<UserRecord> {
        match self {
            UsersResponse::List(users) => users,
            UsersResponse::Users { users } => users,
            UsersResponse::Data { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_ids_become_strings() {
        let session: Session = serde_json::from_value(json!({
            "id": 42, "name": "Ana", "email": "ana@campus.edu", "role": "student"
        })).unwrap();
        assert_eq!(session.id, UserId("42".to_string()));
        assert_eq!(session.role, Role::Student);
    }

    #[test]
    fn unknown_role_falls_back() {
        let session: Session = serde_json::from_value(json!({
            "id": "u1", "role": "guest"
        })).unwrap();
        assert_eq!(session.role, Role::Unknown);
        assert_eq!(session.name, "");
    }

    #[test]
    fn extra_fields_are_kept() {
        let session: Session = serde_json::from_value(json!({
            "id": "u1", "name": "Leo", "email": "leo@campus.edu", "role": "ADMIN",
            "avatar": "https://cdn/leo.png", "department": "Física"
        })).unwrap();
        assert!(session.is_admin());
        assert_eq!(session.avatar.as_deref(), Some("https://cdn/leo.png"));
        assert_eq!(session.extra.get("department"), Some(&json!("Física")));
        assert!(!session.extra.contains_key("avatar"));
    }

    #[test]
    fn profile_response_may_be_wrapped() {
        let wrapped = json!({ "user": { "id": 7, "name": "Sol", "role": "coordinator" } });
        let session = Session::from_profile_response(&wrapped).unwrap();
        assert_eq!(session.role, Role::Coordinator);

        assert!(Session::from_profile_response(&json!({})).is_none());
        assert!(Session::from_profile_response(&json!({ "id": "" })).is_none());
        assert!(Session::from_profile_response(&json!({ "message": "ok" })).is_none());
    }

    #[test]
    fn null_profile_fields_fall_back_to_defaults() {
        let session = Session::from_profile_response(&json!({
            "id": "u1", "name": null, "email": "a@b.c", "role": "student"
        })).unwrap();
        assert_eq!(session.name, "");
        assert_eq!(session.role, Role::Student);

        let session = Session::from_profile_response(&json!({
            "data": { "id": 9, "name": "Eva", "email": null, "role": null }
        })).unwrap();
        assert_eq!(session.email, "");
        assert_eq!(session.role, Role::Unknown);
    }

    #[test]
    fn broken_listing_fields_do_not_drop_records() {
        let users = serde_json::from_value::<UsersResponse>(json!([
            { "id": 1, "status": "active", "role": "student" },
            { "id": 2, "status": "active", "role": null },
            { "id": 3, "status": null, "role": "admin" },
            { "id": 4, "status": 1, "role": ["admin"] },
            { "id": 5 }
        ])).unwrap().into_users();

        assert_eq!(users.len(), 5);
        assert_eq!(users[1].role, Role::Unknown);
        assert_eq!(users[2].status, UserStatus::Other);
        assert_eq!(users[3].status, UserStatus::Other);
        assert_eq!(users[3].role, Role::Unknown);
        assert_eq!(users[4].role, Role::Unknown);
    }

    #[test]
    fn users_response_shapes() {
        let list: UsersResponse = serde_json::from_value(json!([
            { "id": 1, "status": "active", "role": "student" }
        ])).unwrap();
        assert_eq!(list.into_users().len(), 1);

        let wrapped: UsersResponse = serde_json::from_value(json!({
            "users": [{ "id": 1, "status": "suspended" }, { "id": 2, "status": "ACTIVE" }]
        })).unwrap();
        let users = wrapped.into_users();
        assert_eq!(users[0].status, UserStatus::Other);
        assert!(users[1].is_active());
    }
}
