use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfirmationTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfirmationTokens::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ConfirmationTokens::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ConfirmationTokens::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ConfirmationTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConfirmationTokens::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConfirmationTokens::ConfirmedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ConfirmationTokens::Table, ConfirmationTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ConfirmationTokens::Table)
                    .col(ConfirmationTokens::UserId)
                    .name("idx_confirmation_tokens_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfirmationTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ConfirmationTokens {
    Table,
    Id,
    Token,
    UserId,
    CreatedAt,
    ExpiresAt,
    ConfirmedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
