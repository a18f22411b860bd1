pub mod csv;
pub mod db;
pub mod mailer;
pub mod password;
