use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, Select, prelude::*,
};

use crate::{
    EngineError, ResultEngine, Venta, VentaNew, VentaUpdate,
    validation::{Valid, parse_date_bound, search_key},
    ventas,
};

use super::{Page, non_blank};

/// Access to the `venta` table.
///
/// It never looks at the `auto` table: whether `auto_id` points to an
/// existing car is checked by the caller before writing.
pub struct VentaRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VentaRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: Valid<VentaNew>) -> ResultEngine<Venta> {
        let model = ventas::ActiveModel::from(&*input).insert(self.db).await?;
        Ok(model.into())
    }

    pub async fn get_by_id(&self, id: i32) -> ResultEngine<Option<Venta>> {
        let model = ventas::Entity::find_by_id(id).one(self.db).await?;
        Ok(model.map(Venta::from))
    }

    pub async fn list(&self, page: Page) -> ResultEngine<Vec<Venta>> {
        self.fetch(ventas::Entity::find(), Some(page)).await
    }

    /// Overwrite the supplied fields of sale `id`.
    ///
    /// Returns `Ok(None)` when the sale does not exist.
    pub async fn update(&self, id: i32, update: Valid<VentaUpdate>) -> ResultEngine<Option<Venta>> {
        let update = update.into_inner();
        let Some(model) = ventas::Entity::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: ventas::ActiveModel = model.clone().into();
        let mut changed = false;
        if let Some(buyer_name) = update.buyer_name {
            active.nombre_comprador_busqueda = ActiveValue::Set(search_key(&buyer_name));
            active.nombre_comprador = ActiveValue::Set(buyer_name);
            changed = true;
        }
        if let Some(price) = update.price {
            active.precio = ActiveValue::Set(price);
            changed = true;
        }
        if let Some(sale_date) = update.sale_date {
            active.fecha_venta = ActiveValue::Set(sale_date);
            changed = true;
        }
        if let Some(auto_id) = update.auto_id {
            active.auto_id = ActiveValue::Set(auto_id);
            changed = true;
        }
        if !changed {
            return Ok(Some(model.into()));
        }

        let model = active.update(self.db).await?;
        Ok(Some(model.into()))
    }

    /// Remove sale `id`. Returns `false` when it did not exist.
    pub async fn delete(&self, id: i32) -> ResultEngine<bool> {
        let res = ventas::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(res.rows_affected > 0)
    }

    /// All sales of car `auto_id`.
    pub async fn get_by_auto(&self, auto_id: i32) -> ResultEngine<Vec<Venta>> {
        let query = ventas::Entity::find().filter(ventas::Column::AutoId.eq(auto_id));
        self.fetch(query, None).await
    }

    /// Remove every sale of car `auto_id`, returning how many were removed.
    pub async fn delete_by_auto(&self, auto_id: i32) -> ResultEngine<u64> {
        let res = ventas::Entity::delete_many()
            .filter(ventas::Column::AutoId.eq(auto_id))
            .exec(self.db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Case-insensitive substring match on the buyer name.
    pub async fn search_by_buyer(&self, name: &str) -> ResultEngine<Vec<Venta>> {
        let query = ventas::Entity::find()
            .filter(ventas::Column::NombreCompradorBusqueda.contains(search_key(name.trim())));
        self.fetch(query, None).await
    }

    /// Sales dated between `start` and `end`, both inclusive and optional.
    ///
    /// Bounds are date texts, see [`parse_date_bound`]. An unparsable bound
    /// is a validation error.
    pub async fn filter_by_date_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        page: Page,
    ) -> ResultEngine<Vec<Venta>> {
        let mut query = ventas::Entity::find();
        if let Some(start) = non_blank(start) {
            query = query.filter(ventas::Column::FechaVenta.gte(parse_date_bound(start)?));
        }
        if let Some(end) = non_blank(end) {
            query = query.filter(ventas::Column::FechaVenta.lte(parse_date_bound(end)?));
        }
        self.fetch(query, Some(page)).await
    }

    /// Sales priced between `min` and `max`, both inclusive and optional.
    pub async fn filter_by_price_range(
        &self,
        min: Option<f64>,
        max: Option<f64>,
        page: Page,
    ) -> ResultEngine<Vec<Venta>> {
        let mut query = ventas::Entity::find();
        if let Some(min) = min {
            query = query.filter(ventas::Column::Precio.gte(price_bound(min)?));
        }
        if let Some(max) = max {
            query = query.filter(ventas::Column::Precio.lte(price_bound(max)?));
        }
        self.fetch(query, Some(page)).await
    }

    async fn fetch(
        &self,
        query: Select<ventas::Entity>,
        page: Option<Page>,
    ) -> ResultEngine<Vec<Venta>> {
        let mut query = query.order_by_asc(ventas::Column::Id);
        if let Some(page) = page {
            query = query.offset(page.skip).limit(page.limit);
        }
        let models = query.all(self.db).await?;
        Ok(models.into_iter().map(Venta::from).collect())
    }
}

fn price_bound(value: f64) -> ResultEngine<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::Validation(
            "price bounds must be >= 0".to_string(),
        ));
    }
    Ok(value)
}
