use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_companies_table::Migration),
            Box::new(m20240301_000002_create_resale_products_table::Migration),
            Box::new(m20240301_000003_create_raw_materials_table::Migration),
            Box::new(m20240301_000004_create_product_raw_materials_table::Migration),
            Box::new(m20240301_000005_create_daily_sales_table::Migration),
            Box::new(m20240301_000006_create_holidays_table::Migration),
        ]
    }
}

mod m20240301_000001_create_companies_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_companies_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Companies::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Companies::GroupId).uuid().not_null())
                        .col(ColumnDef::new(Companies::Name).string().not_null())
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_companies_group_id")
                        .table(Companies::Table)
                        .col(Companies::GroupId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Companies {
        Table,
        Id,
        GroupId,
        Name,
        CreatedAt,
    }
}

mod m20240301_000002_create_resale_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_resale_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ResaleProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ResaleProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ResaleProducts::GroupId).uuid().not_null())
                        .col(ColumnDef::new(ResaleProducts::CompanyId).uuid().null())
                        .col(ColumnDef::new(ResaleProducts::Name).string().not_null())
                        .col(ColumnDef::new(ResaleProducts::Sku).string().null())
                        .col(
                            ColumnDef::new(ResaleProducts::CurrentStock)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(ResaleProducts::MinStock)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(ResaleProducts::ConversionFactor)
                                .double()
                                .not_null()
                                .default(1.0),
                        )
                        .col(ColumnDef::new(ResaleProducts::PurchaseUnit).string().null())
                        .col(
                            ColumnDef::new(ResaleProducts::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ResaleProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ResaleProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_resale_products_group_company")
                        .table(ResaleProducts::Table)
                        .col(ResaleProducts::GroupId)
                        .col(ResaleProducts::CompanyId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ResaleProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ResaleProducts {
        Table,
        Id,
        GroupId,
        CompanyId,
        Name,
        Sku,
        CurrentStock,
        MinStock,
        ConversionFactor,
        PurchaseUnit,
        Active,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000003_create_raw_materials_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_raw_materials_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RawMaterials::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RawMaterials::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RawMaterials::GroupId).uuid().not_null())
                        .col(ColumnDef::new(RawMaterials::CompanyId).uuid().null())
                        .col(ColumnDef::new(RawMaterials::ParentId).uuid().null())
                        .col(ColumnDef::new(RawMaterials::Name).string().not_null())
                        .col(ColumnDef::new(RawMaterials::StockUnit).string().null())
                        .col(
                            ColumnDef::new(RawMaterials::CurrentStock)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(RawMaterials::MinStock)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(RawMaterials::ConversionFactor)
                                .double()
                                .not_null()
                                .default(1.0),
                        )
                        .col(ColumnDef::new(RawMaterials::PurchaseUnit).string().null())
                        .col(
                            ColumnDef::new(RawMaterials::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(RawMaterials::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RawMaterials::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_raw_materials_group_parent")
                        .table(RawMaterials::Table)
                        .col(RawMaterials::GroupId)
                        .col(RawMaterials::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RawMaterials::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum RawMaterials {
        Table,
        Id,
        GroupId,
        CompanyId,
        ParentId,
        Name,
        StockUnit,
        CurrentStock,
        MinStock,
        ConversionFactor,
        PurchaseUnit,
        Active,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000004_create_product_raw_materials_table {

    use super::m20240301_000002_create_resale_products_table::ResaleProducts;
    use super::m20240301_000003_create_raw_materials_table::RawMaterials;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_product_raw_materials_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductRawMaterials::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductRawMaterials::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductRawMaterials::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductRawMaterials::RawMaterialId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductRawMaterials::QuantityPerUnit)
                                .double()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_raw_materials_product_id")
                                .from(ProductRawMaterials::Table, ProductRawMaterials::ProductId)
                                .to(ResaleProducts::Table, ResaleProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_raw_materials_raw_material_id")
                                .from(
                                    ProductRawMaterials::Table,
                                    ProductRawMaterials::RawMaterialId,
                                )
                                .to(RawMaterials::Table, RawMaterials::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_raw_materials_raw_material_id")
                        .table(ProductRawMaterials::Table)
                        .col(ProductRawMaterials::RawMaterialId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductRawMaterials::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductRawMaterials {
        Table,
        Id,
        ProductId,
        RawMaterialId,
        QuantityPerUnit,
    }
}

mod m20240301_000005_create_daily_sales_table {

    use super::m20240301_000002_create_resale_products_table::ResaleProducts;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_daily_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(DailySales::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(DailySales::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(DailySales::GroupId).uuid().not_null())
                        .col(ColumnDef::new(DailySales::CompanyId).uuid().null())
                        .col(ColumnDef::new(DailySales::ProductId).uuid().not_null())
                        .col(ColumnDef::new(DailySales::SaleDate).date().not_null())
                        .col(ColumnDef::new(DailySales::Quantity).double().not_null())
                        .col(
                            ColumnDef::new(DailySales::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_daily_sales_product_id")
                                .from(DailySales::Table, DailySales::ProductId)
                                .to(ResaleProducts::Table, ResaleProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // history window scans filter on product and date
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_daily_sales_product_date")
                        .table(DailySales::Table)
                        .col(DailySales::ProductId)
                        .col(DailySales::SaleDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_daily_sales_group_date")
                        .table(DailySales::Table)
                        .col(DailySales::GroupId)
                        .col(DailySales::SaleDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DailySales::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum DailySales {
        Table,
        Id,
        GroupId,
        CompanyId,
        ProductId,
        SaleDate,
        Quantity,
        CreatedAt,
    }
}

mod m20240301_000006_create_holidays_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000006_create_holidays_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Holidays::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Holidays::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Holidays::GroupId).uuid().not_null())
                        .col(ColumnDef::new(Holidays::HolidayDate).date().not_null())
                        .col(ColumnDef::new(Holidays::Name).string().not_null())
                        .col(
                            ColumnDef::new(Holidays::Recurring)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_holidays_group_date")
                        .table(Holidays::Table)
                        .col(Holidays::GroupId)
                        .col(Holidays::HolidayDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Holidays::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Holidays {
        Table,
        Id,
        GroupId,
        HolidayDate,
        Name,
        Recurring,
    }
}
