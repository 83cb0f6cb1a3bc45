use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleLocations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehicleLocations::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(VehicleLocations::Latitude).double().not_null())
                    .col(ColumnDef::new(VehicleLocations::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(VehicleLocations::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleLocations::Table, VehicleLocations::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(VehicleLocations::Table)
                    .col(VehicleLocations::VehicleId)
                    .col((VehicleLocations::RecordedAt, IndexOrder::Desc))
                    .name("idx_vehicle_locations_vehicle_id_recorded_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleMaintenance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleMaintenance::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehicleMaintenance::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(VehicleMaintenance::Description).text().not_null())
                    .col(
                        ColumnDef::new(VehicleMaintenance::PerformedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VehicleMaintenance::NextServiceDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleMaintenance::Table, VehicleMaintenance::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(VehicleMaintenance::Table)
                    .col(VehicleMaintenance::VehicleId)
                    .col((VehicleMaintenance::PerformedAt, IndexOrder::Desc))
                    .name("idx_vehicle_maintenance_vehicle_id_performed_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleMaintenance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleLocations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VehicleLocations {
    Table,
    Id,
    VehicleId,
    Latitude,
    Longitude,
    RecordedAt,
}

#[derive(Iden)]
enum VehicleMaintenance {
    Table,
    Id,
    VehicleId,
    Description,
    PerformedAt,
    NextServiceDate,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
