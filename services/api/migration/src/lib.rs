pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_users;
mod m20260901_000002_create_locations;
mod m20260901_000003_create_favourite_locations;
mod m20260901_000004_create_confirmation_tokens;
mod m20260901_000005_add_users_email_lower_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_users::Migration),
            Box::new(m20260901_000002_create_locations::Migration),
            Box::new(m20260901_000003_create_favourite_locations::Migration),
            Box::new(m20260901_000004_create_confirmation_tokens::Migration),
            Box::new(m20260901_000005_add_users_email_lower_index::Migration),
        ]
    }
}
