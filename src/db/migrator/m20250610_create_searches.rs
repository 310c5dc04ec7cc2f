use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Searches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Searches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Searches::City).string().not_null())
                    .col(ColumnDef::new(Searches::Temp).double())
                    .col(ColumnDef::new(Searches::Description).string())
                    .col(ColumnDef::new(Searches::Icon).string())
                    .col(ColumnDef::new(Searches::Timezone).integer())
                    .col(ColumnDef::new(Searches::SearchedAt).string().not_null())
                    .col(ColumnDef::new(Searches::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Searches::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_searches_city_unique")
                    .table(Searches::Table)
                    .col(Searches::City)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_searches_updated_at")
                    .table(Searches::Table)
                    .col(Searches::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Searches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Searches {
    Table,
    Id,
    City,
    Temp,
    Description,
    Icon,
    Timezone,
    SearchedAt,
    CreatedAt,
    UpdatedAt,
}
