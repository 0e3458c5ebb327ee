//! The module contains the `Auto` struct, its create and update shapes and
//! the `auto` table entity.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    ResultEngine, Venta,
    validation::{
        Valid, chassis_key, search_key, validate_chassis, validate_required_text, validate_year,
    },
};

/// A car of the inventory.
///
/// The chassis number is unique across the inventory once case, spaces and
/// hyphens are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auto {
    /// Assigned by the store, never changes.
    pub id: i32,
    pub marca: String,
    pub modelo: String,
    pub year: i32,
    /// Uppercased chassis number, separators kept as given.
    pub chassis_number: String,
}

/// A car with every sale that references it.
#[derive(Clone, Debug, PartialEq)]
pub struct AutoWithVentas {
    pub auto: Auto,
    pub ventas: Vec<Venta>,
}

/// Input for a new car. It has no `id`, the store assigns one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoNew {
    pub marca: String,
    pub modelo: String,
    pub year: i32,
    pub chassis_number: String,
}

impl AutoNew {
    /// Run every field rule and return the normalized input.
    pub fn validated(self) -> ResultEngine<Valid<Self>> {
        Ok(Valid(Self {
            marca: validate_required_text(&self.marca, "marca")?,
            modelo: validate_required_text(&self.modelo, "modelo")?,
            year: validate_year(self.year)?,
            chassis_number: validate_chassis(&self.chassis_number)?,
        }))
    }
}

/// Partial update of a car. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoUpdate {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub year: Option<i32>,
    pub chassis_number: Option<String>,
}

impl AutoUpdate {
    /// Run the field rules on the supplied fields only.
    pub fn validated(self) -> ResultEngine<Valid<Self>> {
        Ok(Valid(Self {
            marca: self
                .marca
                .map(|v| validate_required_text(&v, "marca"))
                .transpose()?,
            modelo: self
                .modelo
                .map(|v| validate_required_text(&v, "modelo"))
                .transpose()?,
            year: self.year.map(validate_year).transpose()?,
            chassis_number: self
                .chassis_number
                .map(|v| validate_chassis(&v))
                .transpose()?,
        }))
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.marca.is_none()
            && self.modelo.is_none()
            && self.year.is_none()
            && self.chassis_number.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub marca: String,
    pub modelo: String,
    pub year: i32,
    pub numero_chasis: String,
    #[sea_orm(unique)]
    pub chasis_normalizado: String,
    pub marca_busqueda: String,
    pub modelo_busqueda: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ventas::Entity")]
    Ventas,
}

impl Related<super::ventas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ventas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Auto {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            marca: value.marca,
            modelo: value.modelo,
            year: value.year,
            chassis_number: value.numero_chasis,
        }
    }
}

impl From<&AutoNew> for ActiveModel {
    fn from(value: &AutoNew) -> Self {
        Self {
            id: ActiveValue::NotSet,
            marca: ActiveValue::Set(value.marca.clone()),
            modelo: ActiveValue::Set(value.modelo.clone()),
            year: ActiveValue::Set(value.year),
            numero_chasis: ActiveValue::Set(value.chassis_number.clone()),
            chasis_normalizado: ActiveValue::Set(chassis_key(&value.chassis_number)),
            marca_busqueda: ActiveValue::Set(search_key(&value.marca)),
            modelo_busqueda: ActiveValue::Set(search_key(&value.modelo)),
        }
    }
}
