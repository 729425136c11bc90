//! Client display model and form normalization.

use serde::Serialize;

use atelier_core::images::{clean_optional, normalize_image_path, PLACEHOLDER_CLIENT};
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::client::{Client, CreateClient, UpdateClient};

#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    /// Always servable: the stored path, or the client placeholder.
    pub image_path: String,
    pub created_at: Timestamp,
}

pub fn to_view(client: &Client) -> ClientView {
    ClientView {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        location: client.location.clone(),
        phone: client.phone.clone(),
        image_path: normalize_image_path(client.image_path.as_deref(), PLACEHOLDER_CLIENT),
        created_at: client.created_at,
    }
}

/// Placeholder view shown when a referenced client row is gone.
pub fn empty_view() -> ClientView {
    ClientView {
        id: 0,
        name: String::new(),
        email: String::new(),
        location: None,
        phone: None,
        image_path: PLACEHOLDER_CLIENT.to_string(),
        created_at: chrono::DateTime::UNIX_EPOCH,
    }
}

pub fn sanitize(mut form: CreateClient) -> CreateClient {
    form.name = form.name.trim().to_string();
    form.email = form.email.trim().to_string();
    form.location = clean_optional(form.location);
    form.phone = clean_optional(form.phone);
    form.image_path = clean_optional(form.image_path);
    form
}

/// Merge an edit form into a loaded client. A blank `image_path` keeps
/// the stored image.
pub fn apply_update(client: &mut Client, form: UpdateClient) {
    client.name = form.name.trim().to_string();
    client.email = form.email.trim().to_string();
    client.location = clean_optional(form.location);
    client.phone = clean_optional(form.phone);
    if let Some(image) = clean_optional(form.image_path) {
        client.image_path = Some(image);
    }
}
