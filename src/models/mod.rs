pub mod user;
pub mod theme;
pub mod stats;
pub mod notification;

pub use user::{Role, Session, UserId, UserRecord, UserStatus, UsersResponse};
pub use theme::ThemePreference;
pub use stats::{AggregateStats, RoleDistribution};
pub use notification::{Notification, NotificationsResponse};
