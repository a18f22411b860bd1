use sea_orm::entity::prelude::*;

/// Registered account. Created disabled; enabled once a confirmation token is used.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: i16,
    pub enabled: bool,
    pub locked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favourite_locations::Entity")]
    FavouriteLocations,
    #[sea_orm(has_many = "super::confirmation_tokens::Entity")]
    ConfirmationTokens,
}

impl Related<super::favourite_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavouriteLocations.def()
    }
}

impl Related<super::confirmation_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConfirmationTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
