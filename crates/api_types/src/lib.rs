//! JSON shapes exchanged with the HTTP API.
//!
//! Field names follow the public contract of the service (`marca`,
//! `numero_chasis`, `nombre_comprador`, ...), independent of the engine's
//! Rust names.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Lenient parsing of the sale timestamp sent by clients.
///
/// Accepts RFC 3339, a naive date time taken as UTC
/// (`2024-03-10T12:00:00`) or a plain date taken as midnight UTC.
pub mod timestamp {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, de};

    const NAIVE_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    pub fn parse(text: &str) -> Option<DateTime<FixedOffset>> {
        let text = text.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Some(date);
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|day| day.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc().fixed_offset())
    }

    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date time: {text}")))
    }
}

pub mod auto {
    use super::*;
    use crate::venta::VentaSimple;

    /// Request body for creating a car.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AutoNew {
        pub marca: String,
        pub modelo: String,
        #[serde(alias = "año")]
        pub year: i32,
        pub numero_chasis: String,
    }

    /// Request body for updating a car. Omitted fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AutoUpdate {
        pub marca: Option<String>,
        pub modelo: Option<String>,
        #[serde(alias = "año")]
        pub year: Option<i32>,
        pub numero_chasis: Option<String>,
    }

    /// Query string of `GET /autos`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AutoListQuery {
        pub skip: Option<u64>,
        pub limit: Option<u64>,
        /// Partial, case-insensitive make filter.
        pub marca: Option<String>,
        /// Partial, case-insensitive model filter.
        pub modelo: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AutoView {
        pub id: i32,
        pub marca: String,
        pub modelo: String,
        pub year: i32,
        pub numero_chasis: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct AutoWithVentas {
        #[serde(flatten)]
        pub auto: AutoView,
        pub ventas: Vec<VentaSimple>,
    }
}

pub mod venta {
    use super::*;
    use crate::auto::AutoView;

    /// Request body for recording a sale.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VentaNew {
        pub nombre_comprador: String,
        pub precio: f64,
        /// See [`timestamp`](crate::timestamp). If absent, server uses now().
        #[serde(default, deserialize_with = "crate::timestamp::deserialize_option")]
        pub fecha_venta: Option<DateTime<FixedOffset>>,
        pub auto_id: i32,
    }

    /// Request body for updating a sale. Omitted fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct VentaUpdate {
        pub nombre_comprador: Option<String>,
        pub precio: Option<f64>,
        #[serde(default, deserialize_with = "crate::timestamp::deserialize_option")]
        pub fecha_venta: Option<DateTime<FixedOffset>>,
        pub auto_id: Option<i32>,
    }

    /// Query string of `GET /ventas`.
    ///
    /// Dates are ISO 8601 texts and win over the price range when both are
    /// given.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct VentaListQuery {
        pub skip: Option<u64>,
        pub limit: Option<u64>,
        pub fecha_inicio: Option<String>,
        pub fecha_fin: Option<String>,
        pub precio_min: Option<f64>,
        pub precio_max: Option<f64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct VentaView {
        pub id: i32,
        pub nombre_comprador: String,
        pub precio: f64,
        pub fecha_venta: DateTime<Utc>,
        pub auto_id: i32,
    }

    /// A sale listed under its car, without the car reference.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct VentaSimple {
        pub id: i32,
        pub nombre_comprador: String,
        pub precio: f64,
        pub fecha_venta: DateTime<Utc>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct VentaWithAuto {
        #[serde(flatten)]
        pub venta: VentaView,
        pub auto: Option<AutoView>,
    }
}

pub mod service {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceInfo {
        pub message: String,
        pub version: String,
        pub endpoints: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub service: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_new_accepts_spanish_year() {
        let auto: auto::AutoNew = serde_json::from_str(
            r#"{"marca":"Toyota","modelo":"Corolla","año":2020,"numero_chasis":"XYZ123"}"#,
        )
        .unwrap();
        assert_eq!(auto.year, 2020);
    }

    #[test]
    fn venta_update_fields_are_optional() {
        let update: venta::VentaUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.nombre_comprador.is_none());
        assert!(update.precio.is_none());
        assert!(update.fecha_venta.is_none());
        assert!(update.auto_id.is_none());
    }

    fn venta_with_date(date: &str) -> Result<venta::VentaNew, serde_json::Error> {
        serde_json::from_str(&format!(
            r#"{{"nombre_comprador":"Ana","precio":10.0,"fecha_venta":{date},"auto_id":1}}"#
        ))
    }

    #[test]
    fn venta_date_accepts_naive_and_offset_forms() {
        let utc = DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z").unwrap();

        let naive = venta_with_date(r#""2024-03-10T12:00:00""#).unwrap();
        assert_eq!(naive.fecha_venta, Some(utc));

        let offset = venta_with_date(r#""2024-03-10T14:00:00+02:00""#).unwrap();
        assert_eq!(offset.fecha_venta, Some(utc));
        assert_eq!(offset.fecha_venta.unwrap().offset().local_minus_utc(), 7200);

        let day = venta_with_date(r#""2024-03-10""#).unwrap();
        assert_eq!(
            day.fecha_venta,
            Some(DateTime::parse_from_rfc3339("2024-03-10T00:00:00Z").unwrap())
        );
    }

    #[test]
    fn venta_date_may_be_null_or_missing() {
        assert_eq!(venta_with_date("null").unwrap().fecha_venta, None);

        let missing: venta::VentaNew =
            serde_json::from_str(r#"{"nombre_comprador":"Ana","precio":10.0,"auto_id":1}"#)
                .unwrap();
        assert_eq!(missing.fecha_venta, None);
    }

    #[test]
    fn venta_date_rejects_garbage() {
        assert!(venta_with_date(r#""yesterday""#).is_err());
        assert!(venta_with_date("20240310").is_err());
    }

    #[test]
    fn composite_is_flattened() {
        let value = serde_json::to_value(auto::AutoWithVentas {
            auto: auto::AutoView {
                id: 1,
                marca: "Toyota".to_string(),
                modelo: "Corolla".to_string(),
                year: 2020,
                numero_chasis: "XYZ123".to_string(),
            },
            ventas: Vec::new(),
        })
        .unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["numero_chasis"], "XYZ123");
        assert!(value["ventas"].as_array().unwrap().is_empty());
    }
}
