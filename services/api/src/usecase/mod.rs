pub mod favourite;
pub mod import;
pub mod location;
pub mod login;
pub mod marker;
pub mod registration;
pub mod user;
