use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only store of inbound events as delivered by the bus bridge
        manager
            .create_table(
                Table::create()
                    .table(RawEvents::Table)
                    .if_not_exists()
                    .col(pk_auto(RawEvents::Id).big_integer())
                    .col(string(RawEvents::Category))
                    .col(string(RawEvents::Name))
                    .col(json_binary(RawEvents::Body))
                    .col(timestamp_with_time_zone(RawEvents::OccurredAt))
                    .col(uuid_null(RawEvents::MessageId))
                    .col(string_null(RawEvents::CorrelationId))
                    .col(string_null(RawEvents::Source))
                    .col(boolean(RawEvents::Processed).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raw_events_occurred_at")
                    .table(RawEvents::Table)
                    .col(RawEvents::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raw_events_processed")
                    .table(RawEvents::Table)
                    .col(RawEvents::Processed)
                    .to_owned(),
            )
            .await?;

        // Redelivery dedup by producer message id
        manager
            .create_index(
                Index::create()
                    .name("idx_raw_events_message_id")
                    .table(RawEvents::Table)
                    .col(RawEvents::MessageId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RawEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RawEvents {
    Table,
    Id,
    Category,
    Name,
    Body,
    OccurredAt,
    MessageId,
    CorrelationId,
    Source,
    Processed,
}
