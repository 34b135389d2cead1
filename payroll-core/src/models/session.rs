use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0} requires an admin session")]
    AdminRequired(&'static str),

    #[error("employee {session_id} may not view payroll data for employee {requested}")]
    NotOwnRecord { session_id: i64, requested: i64 },
}

/// The signed-in user, built once at startup and handed to whatever needs
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gate for admin-only operations; `operation` names the action in the
    /// error message.
    pub fn require_admin(
        &self,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(SessionError::AdminRequired(operation))
        }
    }

    /// Admins may view anyone; employees only themselves.
    pub fn require_access_to(
        &self,
        employee_id: i64,
    ) -> Result<(), SessionError> {
        if self.is_admin() || self.id == employee_id {
            Ok(())
        } else {
            Err(SessionError::NotOwnRecord {
                session_id: self.id,
                requested: employee_id,
            })
        }
    }
}
