use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavouriteLocations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FavouriteLocations::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(FavouriteLocations::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavouriteLocations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(FavouriteLocations::UserId)
                            .col(FavouriteLocations::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FavouriteLocations::Table, FavouriteLocations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FavouriteLocations::Table, FavouriteLocations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavouriteLocations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FavouriteLocations {
    Table,
    UserId,
    LocationId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
}
