//! Entity → display-model conversion, one module per entity.
//!
//! Each module owns three concerns for its entity:
//!
//! - `to_view`: build the outward representation: scalar copies, blank
//!   image paths normalized to the entity's placeholder, separators
//!   rewritten to `/`, nested entities mapped when present.
//! - `sanitize`: normalize an incoming create form (trim text, collapse
//!   blank optionals) before it reaches a repository.
//! - `apply_update`: merge an edit form into a loaded entity. A blank
//!   image field keeps the stored image.
//!
//! Everything here is pure; lookups are resolved by the services and
//! passed in.

pub mod address;
pub mod client;
pub mod member;
pub mod notification;
pub mod project;
pub mod role;
pub mod status;
pub mod user;
