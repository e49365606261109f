use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len_null(Movies::ExternalId, 20))
                    .col(string_len(Movies::Title, 255))
                    .col(integer(Movies::Year))
                    .col(string_len_null(Movies::Genre, 255))
                    .col(string_len_null(Movies::Director, 255))
                    .col(string_len_null(Movies::Plot, 1024))
                    .col(string_len_null(Movies::PosterUrl, 512))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // SQLite treats NULLs as distinct, so user-created movies without a
        // catalog id never collide here.
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_external_id_unique")
                    .table(Movies::Table)
                    .col(Movies::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Movies {
    Table,
    Id,
    ExternalId,
    Title,
    Year,
    Genre,
    Director,
    Plot,
    PosterUrl,
    CreatedAt,
    UpdatedAt,
}
