//! Sale records.
//!
//! A `Venta` is one car sold to a buyer at a price and date. It always points
//! to an existing `Auto` through `auto_id`.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    Auto, ResultEngine,
    validation::{Valid, search_key, validate_buyer_name, validate_price, validate_sale_date},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: i32,
    pub buyer_name: String,
    pub price: f64,
    pub sale_date: DateTime<Utc>,
    pub auto_id: i32,
}

/// A sale with the car it references. `auto` is `None` when that car is
/// gone.
#[derive(Clone, Debug, PartialEq)]
pub struct VentaWithAuto {
    pub venta: Venta,
    pub auto: Option<Auto>,
}

/// Input for a new sale. `sale_date` defaults to the current time.
#[derive(Clone, Debug, PartialEq)]
pub struct VentaNew {
    pub buyer_name: String,
    pub price: f64,
    pub sale_date: Option<DateTime<Utc>>,
    pub auto_id: i32,
}

impl VentaNew {
    pub fn validated(self) -> ResultEngine<Valid<Self>> {
        let sale_date = match self.sale_date {
            Some(date) => validate_sale_date(date)?,
            None => Utc::now(),
        };
        Ok(Valid(Self {
            buyer_name: validate_buyer_name(&self.buyer_name)?,
            price: validate_price(self.price)?,
            sale_date: Some(sale_date),
            auto_id: self.auto_id,
        }))
    }
}

/// Partial update of a sale. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VentaUpdate {
    pub buyer_name: Option<String>,
    pub price: Option<f64>,
    pub sale_date: Option<DateTime<Utc>>,
    pub auto_id: Option<i32>,
}

impl VentaUpdate {
    pub fn validated(self) -> ResultEngine<Valid<Self>> {
        Ok(Valid(Self {
            buyer_name: self
                .buyer_name
                .map(|v| validate_buyer_name(&v))
                .transpose()?,
            price: self.price.map(validate_price).transpose()?,
            sale_date: self.sale_date.map(validate_sale_date).transpose()?,
            auto_id: self.auto_id,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "venta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre_comprador: String,
    #[sea_orm(column_type = "Double")]
    pub precio: f64,
    pub fecha_venta: DateTimeUtc,
    pub auto_id: i32,
    pub nombre_comprador_busqueda: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::autos::Entity",
        from = "Column::AutoId",
        to = "super::autos::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Autos,
}

impl Related<super::autos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Autos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Venta {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            buyer_name: value.nombre_comprador,
            price: value.precio,
            sale_date: value.fecha_venta,
            auto_id: value.auto_id,
        }
    }
}

impl From<&VentaNew> for ActiveModel {
    fn from(value: &VentaNew) -> Self {
        Self {
            id: ActiveValue::NotSet,
            nombre_comprador: ActiveValue::Set(value.buyer_name.clone()),
            precio: ActiveValue::Set(value.price),
            fecha_venta: value
                .sale_date
                .map_or(ActiveValue::Set(Utc::now()), ActiveValue::Set),
            auto_id: ActiveValue::Set(value.auto_id),
            nombre_comprador_busqueda: ActiveValue::Set(search_key(&value.buyer_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn new_sale_defaults_date_to_now() {
        let before = Utc::now();
        let venta = VentaNew {
            buyer_name: "  Ana Pérez".to_string(),
            price: 15000.0,
            sale_date: None,
            auto_id: 1,
        }
        .validated()
        .unwrap();

        assert_eq!(venta.buyer_name, "Ana Pérez");
        let date = venta.sale_date.unwrap();
        assert!(date >= before && date <= Utc::now());
    }

    #[test]
    fn new_sale_rejects_future_date() {
        let venta = VentaNew {
            buyer_name: "Ana".to_string(),
            price: 1.0,
            sale_date: Some(Utc::now() + Duration::days(1)),
            auto_id: 1,
        };
        assert!(venta.validated().is_err());
    }

    #[test]
    fn empty_update_stays_empty() {
        let update = VentaUpdate::default().validated().unwrap();
        assert_eq!(*update, VentaUpdate::default());
    }

    #[test]
    fn update_rejects_zero_price() {
        let update = VentaUpdate {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(update.validated().is_err());
    }
}
