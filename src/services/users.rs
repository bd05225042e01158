//! Services handling back-office accounts.

use crate::domain::types::RecordId;
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::dto::ListPageData;
use crate::dto::users::UsersQuery;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Rejects passwords shorter than [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Form(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn list_users<R>(repo: &R, query: UsersQuery) -> ServiceResult<ListPageData<User>>
where
    R: UserReader + ?Sized,
{
    let page = query.page();
    let page_size = query.page_size() as u64;

    let response = repo
        .list_users(query.to_list_request())
        .await
        .map_err(|err| {
            log::error!("Failed to list users: {err}");
            err
        })?;

    Ok(ListPageData::from_response(response, page, page_size))
}

pub async fn get_user<R>(repo: &R, user_id: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let id: RecordId = user_id.parse()?;

    repo.get_user(id).await.map_err(ServiceError::from)
}

pub async fn create_user<R>(repo: &R, new_user: NewUser) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    validate_password(&new_user.password)?;

    repo.create_user(&new_user).await.map_err(|err| {
        log::error!("Failed to create user {}: {err}", new_user.email);
        ServiceError::from(err)
    })
}

pub async fn update_user<R>(repo: &R, user_id: &str, updates: UpdateUser) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let id: RecordId = user_id.parse()?;

    if updates.is_empty() {
        return Err(ServiceError::Form("nothing to update".to_string()));
    }
    if let Some(password) = updates.password.as_deref() {
        validate_password(password)?;
    }

    repo.update_user(id, &updates).await.map_err(|err| {
        log::error!("Failed to update user {id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_user<R>(repo: &R, user_id: &str) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let id: RecordId = user_id.parse()?;

    repo.delete_user(id).await.map_err(|err| {
        log::error!("Failed to delete user {id}: {err}");
        ServiceError::from(err)
    })
}
