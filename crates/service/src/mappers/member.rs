//! Member display model and form normalization.

use chrono::NaiveDate;
use serde::Serialize;

use atelier_core::images::{clean_optional, normalize_image_path, PLACEHOLDER_MEMBER};
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::address::Address;
use atelier_db::models::member::{CreateMember, Member, UpdateMember};
use atelier_db::models::role::Role;

use super::address::{self, AddressView};
use super::role::{self, RoleView};

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Always servable: the stored avatar, or the member placeholder.
    pub image_path: String,
    pub role: Option<RoleView>,
    pub address: Option<AddressView>,
    pub created_at: Timestamp,
}

/// Build the display model. `role` and `address` are the resolved lookup
/// rows; pass `None` when the member has none.
pub fn to_view(member: &Member, role_row: Option<&Role>, address_row: Option<&Address>) -> MemberView {
    MemberView {
        id: member.id,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        email: member.email.clone(),
        phone: member.phone.clone(),
        date_of_birth: member.date_of_birth,
        image_path: normalize_image_path(member.image_path.as_deref(), PLACEHOLDER_MEMBER),
        role: role_row.map(role::to_view),
        address: address_row.map(address::to_view),
        created_at: member.created_at,
    }
}

pub fn sanitize(mut form: CreateMember) -> CreateMember {
    form.first_name = form.first_name.trim().to_string();
    form.last_name = form.last_name.trim().to_string();
    form.email = form.email.trim().to_string();
    form.phone = clean_optional(form.phone);
    form.image_path = clean_optional(form.image_path);
    form
}

/// Merge an edit form into a loaded member. A blank `image_path` keeps
/// the stored avatar; `role_id` and `address_id` are replaced as given.
pub fn apply_update(member: &mut Member, form: UpdateMember) {
    member.first_name = form.first_name.trim().to_string();
    member.last_name = form.last_name.trim().to_string();
    member.email = form.email.trim().to_string();
    member.phone = clean_optional(form.phone);
    member.date_of_birth = form.date_of_birth;
    member.role_id = form.role_id;
    member.address_id = form.address_id;
    if let Some(image) = clean_optional(form.image_path) {
        member.image_path = Some(image);
    }
}
