//! # Users Facade
//!
//! Registration, lookups, partial update and deletion of users. Passwords go through the
//! injected [`PasswordHasher`]; nothing here ever stores or returns plaintext.
use crate::hashing::PasswordHasher;
use crate::model::{
    CreateUserRequest, NewUser, UpdateUserRequest, User, UserField, UserId, UserView,
};
use crate::user_store::{UserCriterion, UserError, UserSortKey};
use async_trait::async_trait;
use std::sync::Arc;
use store_actor::{Direction, FindQuery, ResourceClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Facade over the User store.
#[derive(Clone, Debug)]
pub struct UsersFacade {
    store: StoreClient<User>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UsersFacade {
    pub fn new(store: StoreClient<User>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl ResourceClient<User> for UsersFacade {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<User> {
        &self.store
    }

    fn not_found(id: &UserId) -> UserError {
        UserError::NotFound(id.to_string())
    }

    fn map_error(e: StoreError) -> UserError {
        UserError::from(e)
    }
}

/// Applies the supplied, non-null fields of `request` that differ from the current values.
///
/// Text fields compare case-sensitively. The password is compared by verifying the
/// candidate against the stored hash and is hashed only when it does not verify.
pub fn apply_update(
    user: &mut User,
    request: &UpdateUserRequest,
    hasher: &dyn PasswordHasher,
) -> Result<(), UserError> {
    if let Some(name) = request.get(UserField::Name).filter(|v| *v != user.name()) {
        user.set_name(name);
    }
    if let Some(surname) = request.get(UserField::Surname).filter(|v| *v != user.surname()) {
        user.set_surname(surname);
    }
    if let Some(username) = request.get(UserField::Username).filter(|v| *v != user.username()) {
        user.set_username(username);
    }
    if let Some(email) = request.get(UserField::Email).filter(|v| *v != user.email()) {
        user.set_email(email);
    }
    if let Some(password) = request.get(UserField::Password) {
        if !hasher.verify(password, user.password_hash()) {
            user.set_password(password, hasher)?;
        }
    }
    Ok(())
}

impl UsersFacade {
    #[instrument(skip(self))]
    pub async fn find_by(&self, query: FindQuery<User>) -> Result<Vec<UserView>, UserError> {
        debug!("Sending request");
        let users = self.store.find(query).await.map_err(Self::map_error)?;
        Ok(users.iter().map(UserView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<UserView>, UserError> {
        self.find_by(
            FindQuery::new()
                .order_by(UserSortKey::Id, Direction::Asc)
                .limit(limit)
                .offset(offset),
        )
        .await
    }

    /// # Errors
    /// `UserError::NotFound` when nothing matches.
    #[instrument(skip(self))]
    pub async fn find_one_by(
        &self,
        criteria: Vec<UserCriterion>,
        order_by: Vec<(UserSortKey, Direction)>,
    ) -> Result<UserView, UserError> {
        let description = format!("{criteria:?}");
        let query = FindQuery {
            criteria,
            order_by,
            limit: 1,
            offset: 0,
        };
        self.find_by(query)
            .await?
            .into_iter()
            .next()
            .ok_or(UserError::NotFound(description))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: UserId) -> Result<UserView, UserError> {
        self.find_one_by(vec![UserCriterion::Id(id)], Vec::new()).await
    }

    /// Registers a fresh user with a hashed password and a generated API key.
    ///
    /// # Errors
    /// - `UserError::InvalidState` when the password is missing
    /// - `UserError::Storage` when the email or username is already taken
    #[instrument(skip(self))]
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, UserError> {
        let CreateUserRequest {
            name,
            surname,
            email,
            username,
            password,
        } = request;
        let Some(password) = password else {
            return Err(UserError::InvalidState("Password cannot be null".into()));
        };
        let password_hash = self.hasher.hash(&password)?;

        debug!("Sending request");
        let user = self
            .store
            .create(NewUser {
                name,
                surname,
                email,
                username,
                password_hash,
            })
            .await
            .map_err(Self::map_error)?;
        info!(id = %user.id(), "User created");
        Ok(user)
    }

    /// Loads the user, applies the request and persists only if something changed.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: UserId, request: &UpdateUserRequest) -> Result<User, UserError> {
        let mut user = self.load(id).await?;
        apply_update(&mut user, request, self.hasher.as_ref())?;

        if !user.is_changed() {
            info!("No changes, nothing persisted");
            return Ok(user);
        }

        user.touch();
        self.store
            .save(user.clone())
            .await
            .map_err(Self::map_error)?;
        info!(fields = ?user.changed_fields(), "Changes persisted");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<bool, UserError> {
        self.load(id).await?;
        self.remove(id).await?;
        info!("User deleted");
        Ok(true)
    }
}
