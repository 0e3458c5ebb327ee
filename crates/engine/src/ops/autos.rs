use sea_orm::TransactionTrait;

use crate::{
    Auto, AutoNew, AutoUpdate, AutoWithVentas, EngineError, ResultEngine,
    repo::{AutoRepository, Page, VentaRepository},
};

use super::{Engine, auto_not_found, require_auto, with_tx};

impl Engine {
    /// Add a car to the inventory.
    ///
    /// Fails with `ExistingKey` when another car already has the same
    /// chassis number once case, spaces and hyphens are ignored.
    pub async fn new_auto(&self, input: AutoNew) -> ResultEngine<Auto> {
        let input = input.validated()?;
        with_tx!(self, |db_tx| {
            let autos = AutoRepository::new(&db_tx);
            if autos.get_by_chassis(&input.chassis_number).await?.is_some() {
                return Err(EngineError::ExistingKey(input.chassis_number.clone()));
            }

            let auto = autos.create(input).await?;
            tracing::debug!("created auto {} ({})", auto.id, auto.chassis_number);
            Ok(auto)
        })
    }

    /// List cars, optionally filtered by make and/or model substring.
    pub async fn autos(
        &self,
        marca: Option<&str>,
        modelo: Option<&str>,
        page: Page,
    ) -> ResultEngine<Vec<Auto>> {
        with_tx!(self, |db_tx| {
            AutoRepository::new(&db_tx)
                .search(marca, modelo, page)
                .await
        })
    }

    /// Return car `auto_id`.
    pub async fn auto(&self, auto_id: i32) -> ResultEngine<Auto> {
        with_tx!(self, |db_tx| require_auto(&db_tx, auto_id).await)
    }

    /// Return the car with the given chassis number, ignoring case, spaces
    /// and hyphens.
    pub async fn auto_by_chassis(&self, chassis_number: &str) -> ResultEngine<Auto> {
        with_tx!(self, |db_tx| {
            AutoRepository::new(&db_tx)
                .get_by_chassis(chassis_number)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(chassis_number.to_string()))
        })
    }

    /// Overwrite the supplied fields of car `auto_id`.
    ///
    /// A new chassis number must not belong to any other car; keeping the
    /// car's own number is allowed.
    pub async fn update_auto(&self, auto_id: i32, update: AutoUpdate) -> ResultEngine<Auto> {
        let update = update.validated()?;
        with_tx!(self, |db_tx| {
            let autos = AutoRepository::new(&db_tx);
            require_auto(&db_tx, auto_id).await?;

            if let Some(chassis) = update.chassis_number.as_deref()
                && let Some(other) = autos.get_by_chassis(chassis).await?
                && other.id != auto_id
            {
                return Err(EngineError::ExistingKey(chassis.to_string()));
            }

            let auto = autos
                .update(auto_id, update)
                .await?
                .ok_or_else(|| auto_not_found(auto_id))?;
            tracing::debug!("updated auto {}", auto.id);
            Ok(auto)
        })
    }

    /// Remove car `auto_id` together with its sales.
    pub async fn delete_auto(&self, auto_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            require_auto(&db_tx, auto_id).await?;

            let removed_sales = VentaRepository::new(&db_tx).delete_by_auto(auto_id).await?;
            if !AutoRepository::new(&db_tx).delete(auto_id).await? {
                return Err(auto_not_found(auto_id));
            }
            tracing::debug!("deleted auto {auto_id} and {removed_sales} sales");
            Ok(())
        })
    }

    /// Return car `auto_id` with every sale referencing it.
    pub async fn auto_with_ventas(&self, auto_id: i32) -> ResultEngine<AutoWithVentas> {
        with_tx!(self, |db_tx| {
            let auto = require_auto(&db_tx, auto_id).await?;
            let ventas = VentaRepository::new(&db_tx).get_by_auto(auto_id).await?;
            Ok(AutoWithVentas { auto, ventas })
        })
    }
}
