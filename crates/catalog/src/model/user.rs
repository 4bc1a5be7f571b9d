//! Users: entity, id, role and state, create/update payloads and response view.
//!
//! A [`User`] never holds a plaintext password. [`User::set_password`] hashes through an
//! injected [`PasswordHasher`], and [`UserView`] leaves out both the hash and the API key.

use crate::hashing::PasswordHasher;
use crate::model::{Changes, Patch};
use crate::user_store::UserError;
use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of a generated API key.
pub const API_KEY_LENGTH: usize = 100;

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar/";

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Account state. Stored as 1, 2 or 3; nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    Fresh = 1,
    Activated = 2,
    Blocked = 3,
}

impl UserState {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for UserState {
    type Error = UserError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(UserState::Fresh),
            2 => Ok(UserState::Activated),
            3 => Ok(UserState::Blocked),
            other => Err(UserError::InvalidArgument(format!(
                "Unsupported state {other}"
            ))),
        }
    }
}

/// Create payload handed to the user store. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub(crate) id: UserId,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) role: Role,
    pub(crate) state: UserState,
    pub(crate) api_key: String,
    pub(crate) last_logged_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    pub(crate) changes: Changes,
}

impl User {
    /// Creates a fresh account with the `User` role and a generated API key.
    pub fn new(id: UserId, params: NewUser) -> Self {
        Self {
            id,
            name: params.name,
            surname: params.surname,
            email: params.email,
            username: params.username,
            password_hash: params.password_hash,
            role: Role::User,
            state: UserState::Fresh,
            api_key: generate_api_key(),
            last_logged_at: None,
            created_at: Utc::now(),
            updated_at: None,
            changes: Changes::default(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Avatar URL keyed by the md5 of the email, as it is stored.
    pub fn gravatar_url(&self) -> String {
        format!("{GRAVATAR_BASE_URL}{:x}", md5::compute(self.email.as_bytes()))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> UserState {
        self.state
    }

    pub fn is_activated(&self) -> bool {
        self.state == UserState::Activated
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn last_logged_at(&self) -> Option<DateTime<Utc>> {
        self.last_logged_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.changes.mark("name");
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) {
        self.surname = surname.into();
        self.changes.mark("surname");
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.changes.mark("email");
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.changes.mark("username");
    }

    /// Hashes `plaintext` and keeps only the hash.
    pub fn set_password(
        &mut self,
        plaintext: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<(), UserError> {
        self.password_hash = hasher.hash(plaintext)?;
        self.changes.mark("password");
        Ok(())
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.changes.mark("role");
    }

    /// Sets the state from its stored code.
    ///
    /// # Errors
    /// `UserError::InvalidArgument` for anything but 1, 2 or 3; the entity is left untouched.
    pub fn set_state(&mut self, raw: i64) -> Result<(), UserError> {
        self.state = UserState::try_from(raw)?;
        self.changes.mark("state");
        Ok(())
    }

    pub fn activate(&mut self) {
        self.state = UserState::Activated;
        self.changes.mark("state");
    }

    pub fn block(&mut self) {
        self.state = UserState::Blocked;
        self.changes.mark("state");
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
        self.changes.mark("api_key");
    }

    /// Replaces the API key with a freshly generated one.
    pub fn regenerate_api_key(&mut self) {
        self.set_api_key(generate_api_key());
    }

    /// Stamps `last_logged_at`. Not a tracked change.
    pub fn record_login(&mut self) {
        self.last_logged_at = Some(Utc::now());
    }

    /// Stamps `updated_at`. Not a tracked change.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.changes.fields()
    }
}

fn generate_api_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect()
}

/// Payload for registering a user. `password` may be missing in the request body, which
/// the facade rejects.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Fields of a user that an update request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Surname,
    Email,
    Username,
    Password,
}

/// Partial update of a user. Fields never supplied stay [`Patch::Unset`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    name: Patch<String>,
    #[serde(default)]
    surname: Patch<String>,
    #[serde(default)]
    email: Patch<String>,
    #[serde(default)]
    username: Patch<String>,
    #[serde(default)]
    password: Patch<String>,
}

impl UpdateUserRequest {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, field: UserField) -> &Patch<String> {
        match field {
            UserField::Name => &self.name,
            UserField::Surname => &self.surname,
            UserField::Email => &self.email,
            UserField::Username => &self.username,
            UserField::Password => &self.password,
        }
    }

    /// Records a supplied value; `None` is an explicit null.
    pub fn set(&mut self, field: UserField, value: Option<String>) -> &mut Self {
        let slot = match field {
            UserField::Name => &mut self.name,
            UserField::Surname => &mut self.surname,
            UserField::Email => &mut self.email,
            UserField::Username => &mut self.username,
            UserField::Password => &mut self.password,
        };
        *slot = value.into();
        self
    }

    pub fn was_set(&self, field: UserField) -> bool {
        self.slot(field).is_set()
    }

    /// The supplied value; `None` when unset or null.
    pub fn get(&self, field: UserField) -> Option<&str> {
        self.slot(field).value().map(String::as_str)
    }

    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.set(UserField::Name, name)
    }

    pub fn set_surname(&mut self, surname: Option<String>) -> &mut Self {
        self.set(UserField::Surname, surname)
    }

    pub fn set_email(&mut self, email: Option<String>) -> &mut Self {
        self.set(UserField::Email, email)
    }

    pub fn set_username(&mut self, username: Option<String>) -> &mut Self {
        self.set(UserField::Username, username)
    }

    pub fn set_password(&mut self, password: Option<String>) -> &mut Self {
        self.set(UserField::Password, password)
    }
}

/// Response projection of a user. Carries no credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub state: UserState,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_logged_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            state: user.state,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_logged_at: user.last_logged_at,
        }
    }
}
