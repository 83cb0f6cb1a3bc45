use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledReports::UserId).uuid().not_null())
                    .col(ColumnDef::new(ScheduledReports::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(ScheduledReports::Frequency).string().not_null())
                    .col(
                        ColumnDef::new(ScheduledReports::NextReportDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScheduledReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(ScheduledReports::Frequency).is_in([
                        "Daily", "Weekly", "Monthly",
                    ]))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduledReports::Table, ScheduledReports::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Due-report scan: WHERE next_report_date <= now.
        manager
            .create_index(
                Index::create()
                    .table(ScheduledReports::Table)
                    .col(ScheduledReports::NextReportDate)
                    .name("idx_scheduled_reports_next_report_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ScheduledReports {
    Table,
    Id,
    UserId,
    VehicleId,
    Frequency,
    NextReportDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}
