use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Enum)
                    .values([
                        UserStatus::Active,
                        UserStatus::Deactivated,
                        UserStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create request_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(RequestStatus::Enum)
                    .values([
                        RequestStatus::Created,
                        RequestStatus::Cancelled,
                        RequestStatus::Accepted,
                        RequestStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create payment_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values([
                        PaymentStatus::Pending,
                        PaymentStatus::Approved,
                        PaymentStatus::Rejected,
                        PaymentStatus::Expired,
                        PaymentStatus::Refunded,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create provider_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(ProviderStatus::Enum)
                    .values([ProviderStatus::Active, ProviderStatus::Deactivated])
                    .to_owned(),
            )
            .await?;

        // Create users table (keyed by the producer-assigned id, not a surrogate)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_null(Users::RoleTag))
                    .col(
                        ColumnDef::new(Users::Status)
                            .enumeration(
                                UserStatus::Enum,
                                [
                                    UserStatus::Active,
                                    UserStatus::Deactivated,
                                    UserStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(string_null(Users::Location))
                    .col(timestamp_with_time_zone_null(Users::DeactivatedAt))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create requests table
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_integer_null(Requests::RequesterId))
                    .col(big_integer_null(Requests::ProviderId))
                    .col(big_integer_null(Requests::SkillId))
                    .col(
                        ColumnDef::new(Requests::Status)
                            .enumeration(
                                RequestStatus::Enum,
                                [
                                    RequestStatus::Created,
                                    RequestStatus::Cancelled,
                                    RequestStatus::Accepted,
                                    RequestStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("created"),
                    )
                    .col(string_null(Requests::ZoneName))
                    .col(boolean(Requests::IsCritical).default(false))
                    .col(boolean(Requests::ProviderAssigned).default(false))
                    .col(timestamp_with_time_zone_null(Requests::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(Requests::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Requests::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_integer_null(Payments::PayerId))
                    .col(big_integer_null(Payments::ProviderId))
                    .col(big_integer_null(Payments::RequestId))
                    .col(double(Payments::Amount).default(0.0))
                    .col(string(Payments::Currency))
                    .col(string_null(Payments::Method))
                    .col(
                        ColumnDef::new(Payments::Status)
                            .enumeration(
                                PaymentStatus::Enum,
                                [
                                    PaymentStatus::Pending,
                                    PaymentStatus::Approved,
                                    PaymentStatus::Rejected,
                                    PaymentStatus::Expired,
                                    PaymentStatus::Refunded,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(timestamp_with_time_zone_null(Payments::CapturedAt))
                    .col(big_integer_null(Payments::RefundId))
                    .col(
                        timestamp_with_time_zone(Payments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Payments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create providers table
        manager
            .create_table(
                Table::create()
                    .table(Providers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Providers::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_null(Providers::FirstName))
                    .col(string_null(Providers::LastName))
                    .col(
                        ColumnDef::new(Providers::Status)
                            .enumeration(
                                ProviderStatus::Enum,
                                [ProviderStatus::Active, ProviderStatus::Deactivated],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(boolean(Providers::ProfileComplete).default(false))
                    .col(
                        timestamp_with_time_zone(Providers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Providers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create provider_skills table (composite key, upserted from provider events)
        manager
            .create_table(
                Table::create()
                    .table(ProviderSkills::Table)
                    .if_not_exists()
                    .col(big_integer(ProviderSkills::ProviderId))
                    .col(big_integer(ProviderSkills::SkillId))
                    .col(string(ProviderSkills::SkillName))
                    .col(big_integer_null(ProviderSkills::CategoryId))
                    .col(boolean(ProviderSkills::Active).default(true))
                    .primary_key(
                        Index::create()
                            .col(ProviderSkills::ProviderId)
                            .col(ProviderSkills::SkillId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create provider_zones table (composite key, upserted from provider events)
        manager
            .create_table(
                Table::create()
                    .table(ProviderZones::Table)
                    .if_not_exists()
                    .col(big_integer(ProviderZones::ProviderId))
                    .col(big_integer(ProviderZones::ZoneId))
                    .col(string(ProviderZones::ZoneName))
                    .col(boolean(ProviderZones::Active).default(true))
                    .primary_key(
                        Index::create()
                            .col(ProviderZones::ProviderId)
                            .col(ProviderZones::ZoneId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Categories::Name))
                    .to_owned(),
            )
            .await?;

        // Create zones catalog table
        manager
            .create_table(
                Table::create()
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Zones::ExternalId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Zones::Name))
                    .col(boolean(Zones::Active).default(true))
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_request_id")
                    .table(Payments::Table)
                    .col(Payments::RequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_requester_id")
                    .table(Requests::Table)
                    .col(Requests::RequesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_zones_name")
                    .table(Zones::Table)
                    .col(Zones::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_provider_zones_provider_active")
                    .table(ProviderZones::Table)
                    .col(ProviderZones::ProviderId)
                    .col(ProviderZones::Active)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProviderZones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Providers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProviderStatus::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(RequestStatus::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(UserStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    ExternalId,
    RoleTag,
    Status,
    Location,
    DeactivatedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    ExternalId,
    RequesterId,
    ProviderId,
    SkillId,
    Status,
    ZoneName,
    IsCritical,
    ProviderAssigned,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    ExternalId,
    PayerId,
    ProviderId,
    RequestId,
    Amount,
    Currency,
    Method,
    Status,
    CapturedAt,
    RefundId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Providers {
    Table,
    ExternalId,
    FirstName,
    LastName,
    Status,
    ProfileComplete,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProviderSkills {
    Table,
    ProviderId,
    SkillId,
    SkillName,
    CategoryId,
    Active,
}

#[derive(DeriveIden)]
enum ProviderZones {
    Table,
    ProviderId,
    ZoneId,
    ZoneName,
    Active,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    ExternalId,
    Name,
}

#[derive(DeriveIden)]
enum Zones {
    Table,
    ExternalId,
    Name,
    Active,
}

#[derive(DeriveIden)]
enum UserStatus {
    #[sea_orm(iden = "user_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "deactivated")]
    Deactivated,
    #[sea_orm(iden = "rejected")]
    Rejected,
}

#[derive(DeriveIden)]
enum RequestStatus {
    #[sea_orm(iden = "request_status")]
    Enum,
    #[sea_orm(iden = "created")]
    Created,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "rejected")]
    Rejected,
}

#[derive(DeriveIden)]
enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "approved")]
    Approved,
    #[sea_orm(iden = "rejected")]
    Rejected,
    #[sea_orm(iden = "expired")]
    Expired,
    #[sea_orm(iden = "refunded")]
    Refunded,
}

#[derive(DeriveIden)]
enum ProviderStatus {
    #[sea_orm(iden = "provider_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "deactivated")]
    Deactivated,
}
