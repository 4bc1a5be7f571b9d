//! StoreEntity implementation for the User domain type.
//!
//! Email and username are unique across users: the store refuses a create or save that
//! would duplicate either one.

use crate::model::{NewUser, Role, User, UserId, UserState};
use std::cmp::Ordering;
use std::convert::Infallible;
use store_actor::StoreEntity;

/// Lookup criteria for users. Several criteria are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCriterion {
    Id(UserId),
    Name(String),
    Surname(String),
    Email(String),
    Username(String),
    Role(Role),
    State(UserState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortKey {
    Id,
    Name,
    Surname,
    Email,
    Username,
    CreatedAt,
}

impl StoreEntity for User {
    type Id = UserId;
    type Create = NewUser;
    type Criterion = UserCriterion;
    type SortKey = UserSortKey;
    type Error = Infallible;

    fn from_create_params(id: UserId, params: NewUser) -> Result<Self, Infallible> {
        Ok(User::new(id, params))
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn matches(&self, criterion: &UserCriterion) -> bool {
        match criterion {
            UserCriterion::Id(id) => self.id == *id,
            UserCriterion::Name(name) => &self.name == name,
            UserCriterion::Surname(surname) => &self.surname == surname,
            UserCriterion::Email(email) => &self.email == email,
            UserCriterion::Username(username) => &self.username == username,
            UserCriterion::Role(role) => self.role == *role,
            UserCriterion::State(state) => self.state == *state,
        }
    }

    fn compare_by(&self, other: &Self, key: &UserSortKey) -> Ordering {
        match key {
            UserSortKey::Id => self.id.cmp(&other.id),
            UserSortKey::Name => self.name.cmp(&other.name),
            UserSortKey::Surname => self.surname.cmp(&other.surname),
            UserSortKey::Email => self.email.cmp(&other.email),
            UserSortKey::Username => self.username.cmp(&other.username),
            UserSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.email == other.email {
            Some(format!("email {} is already registered", self.email))
        } else if self.username == other.username {
            Some(format!("username {} is already taken", self.username))
        } else {
            None
        }
    }

    fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u32, email: &str, username: &str) -> User {
        User::new(
            UserId(id),
            NewUser {
                name: "Test".into(),
                surname: "User".into(),
                email: email.into(),
                username: username.into(),
                password_hash: "hash".into(),
            },
        )
    }

    #[test]
    fn test_conflicts_on_email_or_username() {
        let ann = user(1, "ann@example.com", "ann");

        assert!(user(2, "ann@example.com", "other")
            .conflicts_with(&ann)
            .is_some());
        assert!(user(2, "other@example.com", "ann")
            .conflicts_with(&ann)
            .is_some());
        assert!(user(2, "bob@example.com", "bob")
            .conflicts_with(&ann)
            .is_none());
    }

    #[test]
    fn test_criteria_match_state_and_role() {
        let mut ann = user(1, "ann@example.com", "ann");
        assert!(ann.matches(&UserCriterion::State(UserState::Fresh)));
        assert!(ann.matches(&UserCriterion::Role(Role::User)));

        ann.activate();
        assert!(!ann.matches(&UserCriterion::State(UserState::Fresh)));
        assert!(ann.matches(&UserCriterion::Username("ann".into())));
    }
}
