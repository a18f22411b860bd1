use sea_orm::entity::prelude::*;

/// Point of interest. `location_type` holds the upper-case type name (`"LAKE"`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub location_type: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favourite_locations::Entity")]
    FavouriteLocations,
}

impl Related<super::favourite_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavouriteLocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
