use serde::{Deserialize, Serialize};
use crate::models::user::{Role, UserRecord};

/// Distribución de usuarios por rol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleDistribution {
    pub students: usize,
    pub coordinators: usize,
    pub admins: usize,
}

/// Snapshot derivado del listado de usuarios. Nunca se cachea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub active_percentage: u32,
    pub distribution: RoleDistribution,
}

impl AggregateStats {
    /// Calcula las estadísticas completas de una vez
    pub fn from_users(users: &[UserRecord]) -> Self {
        let total = users.len();
        let active = users.iter().filter(|u| u.is_active()).count();

        let mut distribution = RoleDistribution::default();
        for user in users {
            match user.role {
                Role::Student => distribution.students += 1,
                Role::Coordinator => distribution.coordinators += 1,
                Role::Admin => distribution.admins += 1,
                Role::Unknown => {}
            }
        }

        Self {
            total,
            active,
            inactive: total - active,
            active_percentage: percentage(active, total),
            distribution,
        }
    }
}

/// round(part / total * 100), 0 si total == 0
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
