use cov_core::{SampleResult, WeightedCatalog, pick_up_to_unique};
use rand::Rng;
use serde::Serialize;

use super::record::Actor;

/// A dummy account as the user-admin API expects it. The username is the
/// patch path, not part of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(skip)]
    pub username: String,
    pub password: String,
    #[serde(rename = "backend_roles")]
    pub roles: Vec<String>,
}

/// Build `count` users numbered from `id_offset`.
///
/// User `n` is named `User{n:05}` with password `{n:05}` and holds between
/// one and `max_roles` distinct roles drawn from `roles`.
pub fn generate_users<R: Rng + ?Sized>(
    count: usize,
    id_offset: usize,
    roles: &WeightedCatalog,
    max_roles: usize,
    rng: &mut R,
) -> SampleResult<Vec<User>> {
    (id_offset..id_offset + count)
        .map(|n| {
            Ok(User {
                username: format!("User{n:05}"),
                password: format!("{n:05}"),
                roles: pick_up_to_unique(roles, max_roles, rng)?,
            })
        })
        .collect()
}

/// The generated users plus the subset allowed to act as substitutes.
#[derive(Debug, Clone)]
pub struct Population {
    users: Vec<User>,
    delegates: Vec<usize>,
}

impl Population {
    /// Users holding any of `delegation_roles` become substitution candidates.
    pub fn new(users: Vec<User>, delegation_roles: &[String]) -> Self {
        let delegates = users
            .iter()
            .enumerate()
            .filter(|(_, u)| u.roles.iter().any(|r| delegation_roles.contains(r)))
            .map(|(i, _)| i)
            .collect();
        Self { users, delegates }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Indices into [`Population::users`] of substitution candidates.
    pub fn delegates(&self) -> &[usize] {
        &self.delegates
    }

    /// The actor for the user at `idx`; its oid is the population index.
    pub fn actor(&self, idx: usize) -> Option<Actor> {
        self.users.get(idx).map(|u| Actor {
            oid: idx,
            login: u.username.clone(),
            role: u.roles.first().cloned().unwrap_or_default(),
        })
    }
}
