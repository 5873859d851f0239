use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blueprints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Blueprints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Blueprints::UserId).uuid().not_null())
                    .col(ColumnDef::new(Blueprints::Name).string().not_null())
                    .col(ColumnDef::new(Blueprints::Slug).string().not_null())
                    .col(ColumnDef::new(Blueprints::Description).string().null())
                    .col(ColumnDef::new(Blueprints::Content).text().not_null())
                    .col(
                        ColumnDef::new(Blueprints::Visibility)
                            .string()
                            .not_null()
                            .default("PRIVATE"),
                    )
                    .col(
                        ColumnDef::new(Blueprints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Blueprints::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blueprints_user_id")
                            .from(Blueprints::Table, Blueprints::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blueprints_user_id")
                    .table(Blueprints::Table)
                    .col(Blueprints::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blueprints_user_id_slug")
                    .table(Blueprints::Table)
                    .col(Blueprints::UserId)
                    .col(Blueprints::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blueprints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blueprints {
    Table,
    Id,
    UserId,
    Name,
    Slug,
    Description,
    Content,
    Visibility,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
