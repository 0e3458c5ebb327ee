//! Initial schema migration.
//!
//! - `auto`: the car inventory. `numero_chasis` keeps the chassis number as
//!   entered (uppercased), `chasis_normalizado` is the same number without
//!   spaces and hyphens and is unique. `marca_busqueda` and
//!   `modelo_busqueda` hold the lowercased make and model for substring
//!   search.
//! - `venta`: sales, each referencing one car. Removing a car removes its
//!   sales. `nombre_comprador_busqueda` is the lowercased buyer name.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Auto {
    Table,
    Id,
    Marca,
    Modelo,
    Year,
    NumeroChasis,
    ChasisNormalizado,
    MarcaBusqueda,
    ModeloBusqueda,
}

#[derive(Iden)]
enum Venta {
    Table,
    Id,
    NombreComprador,
    Precio,
    FechaVenta,
    AutoId,
    NombreCompradorBusqueda,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Auto::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Auto::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Auto::Marca).string().not_null())
                    .col(ColumnDef::new(Auto::Modelo).string().not_null())
                    .col(ColumnDef::new(Auto::Year).integer().not_null())
                    .col(ColumnDef::new(Auto::NumeroChasis).string().not_null())
                    .col(
                        ColumnDef::new(Auto::ChasisNormalizado)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Auto::MarcaBusqueda).string().not_null())
                    .col(ColumnDef::new(Auto::ModeloBusqueda).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-auto-chasis_normalizado-unique")
                    .table(Auto::Table)
                    .col(Auto::ChasisNormalizado)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venta::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venta::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venta::NombreComprador).string().not_null())
                    .col(ColumnDef::new(Venta::Precio).double().not_null())
                    .col(
                        ColumnDef::new(Venta::FechaVenta)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Venta::AutoId).integer().not_null())
                    .col(
                        ColumnDef::new(Venta::NombreCompradorBusqueda)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-venta-auto_id")
                            .from(Venta::Table, Venta::AutoId)
                            .to(Auto::Table, Auto::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-venta-auto_id")
                    .table(Venta::Table)
                    .col(Venta::AutoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Venta::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Auto::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
