//! Database migrations for the venue service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241215_000001_create_bookings::Migration),
            Box::new(m20241215_000002_create_content::Migration),
            Box::new(m20241215_000003_create_gallery_assets::Migration),
        ]
    }
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20241215_000001_create_bookings {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241215_000001_create_bookings"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Bookings::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Bookings::Name).string().not_null())
                        .col(ColumnDef::new(Bookings::Email).string().not_null())
                        .col(ColumnDef::new(Bookings::Phone).string().not_null())
                        .col(ColumnDef::new(Bookings::EventDate).date().not_null())
                        .col(ColumnDef::new(Bookings::EventType).string_len(32).not_null())
                        .col(ColumnDef::new(Bookings::GuestCount).integer())
                        .col(ColumnDef::new(Bookings::Message).text())
                        .col(
                            ColumnDef::new(Bookings::Status)
                                .string_len(32)
                                .not_null()
                                .default("new"),
                        )
                        .col(ColumnDef::new(Bookings::IdempotencyKey).string_len(255))
                        .col(timestamp_col(Bookings::CreatedAt))
                        .to_owned(),
                )
                .await?;

            // NULL keys never collide, so only keyed submissions are deduplicated
            manager
                .create_index(
                    Index::create()
                        .name("idx_bookings_idempotency_key")
                        .table(Bookings::Table)
                        .col(Bookings::IdempotencyKey)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bookings_created_at")
                        .table(Bookings::Table)
                        .col(Bookings::CreatedAt)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Bookings::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Bookings {
        Table,
        Id,
        Name,
        Email,
        Phone,
        EventDate,
        EventType,
        GuestCount,
        Message,
        Status,
        IdempotencyKey,
        CreatedAt,
    }
}

mod m20241215_000002_create_content {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241215_000002_create_content"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Pages::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Pages::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Pages::Slug).string().not_null().unique_key())
                        .col(ColumnDef::new(Pages::Content).json().not_null())
                        .col(timestamp_col(Pages::CreatedAt))
                        .col(timestamp_col(Pages::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SiteSettings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SiteSettings::Id)
                                .integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SiteSettings::SiteName).string().not_null())
                        .col(ColumnDef::new(SiteSettings::Tagline).string())
                        .col(ColumnDef::new(SiteSettings::ContactEmail).string().not_null())
                        .col(ColumnDef::new(SiteSettings::ContactPhone).string().not_null())
                        .col(ColumnDef::new(SiteSettings::Address).string())
                        .col(ColumnDef::new(SiteSettings::MapUrl).string())
                        .col(ColumnDef::new(SiteSettings::FacebookUrl).string())
                        .col(ColumnDef::new(SiteSettings::InstagramUrl).string())
                        .col(ColumnDef::new(SiteSettings::BusinessHours).string())
                        .col(ColumnDef::new(SiteSettings::BookingNotificationEmail).string())
                        .col(timestamp_col(SiteSettings::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Events::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Events::Title).string().not_null())
                        .col(ColumnDef::new(Events::Description).text().not_null())
                        .col(ColumnDef::new(Events::Date).date().not_null())
                        .col(ColumnDef::new(Events::Time).string())
                        .col(ColumnDef::new(Events::ImageUrl).string())
                        .col(ColumnDef::new(Events::Category).string())
                        .col(
                            ColumnDef::new(Events::Featured)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(timestamp_col(Events::CreatedAt))
                        .col(timestamp_col(Events::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_events_date")
                        .table(Events::Table)
                        .col(Events::Date)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Faqs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Faqs::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Faqs::Question).text().not_null())
                        .col(ColumnDef::new(Faqs::Answer).text().not_null())
                        .col(ColumnDef::new(Faqs::Position).integer().not_null().default(0))
                        .col(timestamp_col(Faqs::CreatedAt))
                        .col(timestamp_col(Faqs::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Testimonials::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Testimonials::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Testimonials::Author).string().not_null())
                        .col(ColumnDef::new(Testimonials::Role).string())
                        .col(ColumnDef::new(Testimonials::Quote).text().not_null())
                        .col(
                            ColumnDef::new(Testimonials::Rating)
                                .small_integer()
                                .not_null()
                                .default(5),
                        )
                        .col(
                            ColumnDef::new(Testimonials::Position)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Testimonials::Published)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(timestamp_col(Testimonials::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ServiceDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceDetails::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ServiceDetails::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ServiceDetails::Description).text().not_null())
                        .col(ColumnDef::new(ServiceDetails::Images).json().not_null())
                        .col(timestamp_col(ServiceDetails::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ServiceDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Testimonials::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Faqs::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Events::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SiteSettings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Pages::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Pages {
        Table,
        Id,
        Slug,
        Content,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SiteSettings {
        Table,
        Id,
        SiteName,
        Tagline,
        ContactEmail,
        ContactPhone,
        Address,
        MapUrl,
        FacebookUrl,
        InstagramUrl,
        BusinessHours,
        BookingNotificationEmail,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Events {
        Table,
        Id,
        Title,
        Description,
        Date,
        Time,
        ImageUrl,
        Category,
        Featured,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Faqs {
        Table,
        Id,
        Question,
        Answer,
        Position,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Testimonials {
        Table,
        Id,
        Author,
        Role,
        Quote,
        Rating,
        Position,
        Published,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ServiceDetails {
        Table,
        Id,
        Name,
        Description,
        Images,
        UpdatedAt,
    }
}

mod m20241215_000003_create_gallery_assets {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241215_000003_create_gallery_assets"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GalleryAssets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GalleryAssets::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(GalleryAssets::Title).string().not_null())
                        .col(ColumnDef::new(GalleryAssets::Alt).string())
                        .col(ColumnDef::new(GalleryAssets::Url).string().not_null())
                        .col(ColumnDef::new(GalleryAssets::Key).string())
                        .col(
                            ColumnDef::new(GalleryAssets::Category)
                                .string()
                                .not_null()
                                .default("general"),
                        )
                        .col(
                            ColumnDef::new(GalleryAssets::Position)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(timestamp_col(GalleryAssets::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_gallery_assets_category_position")
                        .table(GalleryAssets::Table)
                        .col(GalleryAssets::Category)
                        .col(GalleryAssets::Position)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GalleryAssets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GalleryAssets {
        Table,
        Id,
        Title,
        Alt,
        Url,
        Key,
        Category,
        Position,
        CreatedAt,
    }
}
