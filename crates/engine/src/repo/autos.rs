use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Auto, AutoNew, AutoUpdate, EngineError, ResultEngine, autos,
    validation::{Valid, chassis_key, search_key},
};

use super::{Page, non_blank};

/// Access to the `auto` table.
///
/// Writes take [`Valid`] input, so every field already passed its rules.
/// Chassis uniqueness is not checked up front; callers look the chassis
/// number up first. A collision that slips through is still reported as
/// [`EngineError::ExistingKey`] by the unique index.
pub struct AutoRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AutoRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert a new car and return it with its assigned id.
    pub async fn create(&self, input: Valid<AutoNew>) -> ResultEngine<Auto> {
        let model = autos::ActiveModel::from(&*input)
            .insert(self.db)
            .await
            .map_err(|err| EngineError::from_write(err, &input.chassis_number))?;
        Ok(model.into())
    }

    pub async fn get_by_id(&self, id: i32) -> ResultEngine<Option<Auto>> {
        let model = autos::Entity::find_by_id(id).one(self.db).await?;
        Ok(model.map(Auto::from))
    }

    /// Lookup ignoring case, spaces and hyphens.
    pub async fn get_by_chassis(&self, chassis_number: &str) -> ResultEngine<Option<Auto>> {
        let model = autos::Entity::find()
            .filter(autos::Column::ChasisNormalizado.eq(chassis_key(chassis_number)))
            .one(self.db)
            .await?;
        Ok(model.map(Auto::from))
    }

    pub async fn list(&self, page: Page) -> ResultEngine<Vec<Auto>> {
        self.search(None, None, page).await
    }

    /// Case-insensitive substring search on make and/or model, matched
    /// against the folded search columns. Both filters must match when both
    /// are given; blank filters are ignored.
    pub async fn search(
        &self,
        marca: Option<&str>,
        modelo: Option<&str>,
        page: Page,
    ) -> ResultEngine<Vec<Auto>> {
        let mut query = autos::Entity::find();
        if let Some(marca) = non_blank(marca) {
            query = query.filter(autos::Column::MarcaBusqueda.contains(search_key(marca)));
        }
        if let Some(modelo) = non_blank(modelo) {
            query = query.filter(autos::Column::ModeloBusqueda.contains(search_key(modelo)));
        }

        let models = query
            .order_by_asc(autos::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Auto::from).collect())
    }

    /// Overwrite the supplied fields of car `id`.
    ///
    /// Returns `Ok(None)` when the car does not exist.
    pub async fn update(&self, id: i32, update: Valid<AutoUpdate>) -> ResultEngine<Option<Auto>> {
        let update = update.into_inner();
        let Some(model) = autos::Entity::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active: autos::ActiveModel = model.into();
        if let Some(marca) = update.marca {
            active.marca_busqueda = ActiveValue::Set(search_key(&marca));
            active.marca = ActiveValue::Set(marca);
        }
        if let Some(modelo) = update.modelo {
            active.modelo_busqueda = ActiveValue::Set(search_key(&modelo));
            active.modelo = ActiveValue::Set(modelo);
        }
        if let Some(year) = update.year {
            active.year = ActiveValue::Set(year);
        }
        if let Some(chassis) = &update.chassis_number {
            active.chasis_normalizado = ActiveValue::Set(chassis_key(chassis));
            active.numero_chasis = ActiveValue::Set(chassis.clone());
        }

        let model = active.update(self.db).await.map_err(|err| {
            EngineError::from_write(err, update.chassis_number.as_deref().unwrap_or_default())
        })?;
        Ok(Some(model.into()))
    }

    /// Remove car `id`. Returns `false` when it did not exist.
    pub async fn delete(&self, id: i32) -> ResultEngine<bool> {
        let res = autos::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
