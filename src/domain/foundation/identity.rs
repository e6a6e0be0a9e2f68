//! Caller identity types for the domain layer.
//!
//! The identity collaborator (an upstream auth gateway) verifies credentials
//! and hands every core operation the caller's id and role. The core trusts
//! this input completely and performs no credential checks of its own;
//! identity is threaded explicitly into every handler rather than read from
//! ambient request state.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The role a verified caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Counselor,
}

impl Role {
    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "client" => Some(Role::Client),
            "counselor" => Some(Role::Counselor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Counselor => "counselor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A verified caller: user id plus role, as supplied by the identity
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn client(user_id: UserId) -> Self {
        Self::new(user_id, Role::Client)
    }

    pub fn counselor(user_id: UserId) -> Self {
        Self::new(user_id, Role::Counselor)
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }

    pub fn is_counselor(&self) -> bool {
        self.role == Role::Counselor
    }
}
