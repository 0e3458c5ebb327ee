use sea_orm::TransactionTrait;

use crate::{
    ResultEngine, Venta, VentaNew, VentaUpdate, VentaWithAuto,
    repo::{AutoRepository, Page, VentaRepository},
};

use super::{Engine, require_auto, venta_not_found, with_tx};

/// Filters for listing sales.
///
/// The date range wins when either date bound is set, then the price range;
/// with no bound at all every sale is listed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VentaListFilter {
    pub page: Page,
    /// Inclusive lower date bound, as text.
    pub date_from: Option<String>,
    /// Inclusive upper date bound, as text.
    pub date_to: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl VentaListFilter {
    fn has_date_range(&self) -> bool {
        is_set(self.date_from.as_deref()) || is_set(self.date_to.as_deref())
    }

    fn has_price_range(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl Engine {
    /// Record a sale. The referenced car must exist.
    pub async fn new_venta(&self, input: VentaNew) -> ResultEngine<Venta> {
        let input = input.validated()?;
        with_tx!(self, |db_tx| {
            require_auto(&db_tx, input.auto_id).await?;

            let venta = VentaRepository::new(&db_tx).create(input).await?;
            tracing::debug!("created venta {} for auto {}", venta.id, venta.auto_id);
            Ok(venta)
        })
    }

    /// List sales, see [`VentaListFilter`].
    pub async fn ventas(&self, filter: &VentaListFilter) -> ResultEngine<Vec<Venta>> {
        with_tx!(self, |db_tx| {
            let ventas = VentaRepository::new(&db_tx);
            if filter.has_date_range() {
                ventas
                    .filter_by_date_range(
                        filter.date_from.as_deref(),
                        filter.date_to.as_deref(),
                        filter.page,
                    )
                    .await
            } else if filter.has_price_range() {
                ventas
                    .filter_by_price_range(filter.price_min, filter.price_max, filter.page)
                    .await
            } else {
                ventas.list(filter.page).await
            }
        })
    }

    /// Return sale `venta_id`.
    pub async fn venta(&self, venta_id: i32) -> ResultEngine<Venta> {
        with_tx!(self, |db_tx| {
            VentaRepository::new(&db_tx)
                .get_by_id(venta_id)
                .await?
                .ok_or_else(|| venta_not_found(venta_id))
        })
    }

    /// Overwrite the supplied fields of sale `venta_id`.
    ///
    /// When `auto_id` changes the new car must exist.
    pub async fn update_venta(&self, venta_id: i32, update: VentaUpdate) -> ResultEngine<Venta> {
        let update = update.validated()?;
        with_tx!(self, |db_tx| {
            if let Some(auto_id) = update.auto_id {
                require_auto(&db_tx, auto_id).await?;
            }

            let venta = VentaRepository::new(&db_tx)
                .update(venta_id, update)
                .await?
                .ok_or_else(|| venta_not_found(venta_id))?;
            tracing::debug!("updated venta {}", venta.id);
            Ok(venta)
        })
    }

    /// Remove sale `venta_id`.
    pub async fn delete_venta(&self, venta_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if !VentaRepository::new(&db_tx).delete(venta_id).await? {
                return Err(venta_not_found(venta_id));
            }
            tracing::debug!("deleted venta {venta_id}");
            Ok(())
        })
    }

    /// Every sale of car `auto_id`. The car must exist.
    pub async fn ventas_by_auto(&self, auto_id: i32) -> ResultEngine<Vec<Venta>> {
        with_tx!(self, |db_tx| {
            require_auto(&db_tx, auto_id).await?;
            VentaRepository::new(&db_tx).get_by_auto(auto_id).await
        })
    }

    /// Sales whose buyer name contains `name`, ignoring case.
    pub async fn ventas_by_buyer(&self, name: &str) -> ResultEngine<Vec<Venta>> {
        with_tx!(self, |db_tx| {
            VentaRepository::new(&db_tx).search_by_buyer(name).await
        })
    }

    /// Return sale `venta_id` with the car it references, if that car still
    /// exists.
    pub async fn venta_with_auto(&self, venta_id: i32) -> ResultEngine<VentaWithAuto> {
        with_tx!(self, |db_tx| {
            let venta = VentaRepository::new(&db_tx)
                .get_by_id(venta_id)
                .await?
                .ok_or_else(|| venta_not_found(venta_id))?;
            let auto = AutoRepository::new(&db_tx).get_by_id(venta.auto_id).await?;
            Ok(VentaWithAuto { venta, auto })
        })
    }
}
