//! sea-orm entities for the Wayfinder API database.

pub mod confirmation_tokens;
pub mod favourite_locations;
pub mod locations;
pub mod users;
