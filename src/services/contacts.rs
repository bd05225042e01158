//! Services handling the contacts collection.

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::RecordId;
use crate::dto::ListPageData;
use crate::dto::contacts::ContactsQuery;
use crate::repository::{ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};

/// Joins the non-blank name parts with a single space.
pub fn full_name(nombres: &str, apellidos: &str) -> String {
    [nombres.trim(), apellidos.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Loads one page of contacts matching the query.
pub async fn list_contacts<R>(
    repo: &R,
    query: ContactsQuery,
) -> ServiceResult<ListPageData<Contact>>
where
    R: ContactReader + ?Sized,
{
    let page = query.page();
    let page_size = query.page_size() as u64;

    let response = repo
        .list_contacts(query.to_list_request())
        .await
        .map_err(|err| {
            log::error!("Failed to list contacts: {err}");
            err
        })?;

    Ok(ListPageData::from_response(response, page, page_size))
}

pub async fn get_contact<R>(repo: &R, contact_id: &str) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    let id: RecordId = contact_id.parse()?;

    repo.get_contact(id).await.map_err(ServiceError::from)
}

/// Creates a contact, deriving the full name when it was left blank.
pub async fn create_contact<R>(repo: &R, mut new_contact: NewContact) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    if new_contact.nombres.trim().is_empty() {
        return Err(ServiceError::Form("nombres is required".to_string()));
    }

    if new_contact.nombre_completo.trim().is_empty() {
        new_contact.nombre_completo = full_name(&new_contact.nombres, &new_contact.apellidos);
    }

    repo.create_contact(&new_contact).await.map_err(|err| {
        log::error!("Failed to create contact: {err}");
        ServiceError::from(err)
    })
}

/// Applies a partial update. When a name part changes and no full name is
/// given, the full name is rebuilt, taking the unchanged part from the stored
/// contact.
pub async fn update_contact<R>(
    repo: &R,
    contact_id: &str,
    mut updates: UpdateContact,
) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let id: RecordId = contact_id.parse()?;

    if updates.is_empty() {
        return Err(ServiceError::Form("nothing to update".to_string()));
    }

    let nombres = non_blank(updates.nombres.as_deref());
    let apellidos = non_blank(updates.apellidos.as_deref());
    if updates.nombre_completo.is_none() && (nombres.is_some() || apellidos.is_some()) {
        let derived = match (nombres, apellidos) {
            (Some(nombres), Some(apellidos)) => full_name(nombres, apellidos),
            _ => {
                let stored = repo.get_contact(id).await.map_err(|err| {
                    log::error!("Failed to load contact {id}: {err}");
                    ServiceError::from(err)
                })?;
                full_name(
                    nombres.unwrap_or(&stored.nombres),
                    apellidos.unwrap_or(&stored.apellidos),
                )
            }
        };
        updates.nombre_completo = Some(derived);
    }

    repo.update_contact(id, &updates).await.map_err(|err| {
        log::error!("Failed to update contact {id}: {err}");
        ServiceError::from(err)
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deletes the contact and returns it as it was.
pub async fn delete_contact<R>(repo: &R, contact_id: &str) -> ServiceResult<Contact>
where
    R: ContactWriter + ?Sized,
{
    let id: RecordId = contact_id.parse()?;

    repo.delete_contact(id).await.map_err(|err| {
        log::error!("Failed to delete contact {id}: {err}");
        ServiceError::from(err)
    })
}
