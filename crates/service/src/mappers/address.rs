//! Address display model and form normalization.

use serde::Serialize;

use atelier_core::types::DbId;
use atelier_db::models::address::{Address, CreateAddress, UpdateAddress};

#[derive(Debug, Clone, Serialize)]
pub struct AddressView {
    pub id: DbId,
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

pub fn to_view(address: &Address) -> AddressView {
    AddressView {
        id: address.id,
        street: address.street.clone(),
        postal_code: address.postal_code.clone(),
        city: address.city.clone(),
    }
}

pub fn sanitize(mut form: CreateAddress) -> CreateAddress {
    form.street = form.street.trim().to_string();
    form.postal_code = form.postal_code.trim().to_string();
    form.city = form.city.trim().to_string();
    form
}

pub fn apply_update(address: &mut Address, form: UpdateAddress) {
    address.street = form.street.trim().to_string();
    address.postal_code = form.postal_code.trim().to_string();
    address.city = form.city.trim().to_string();
}
