//! Admin API wire types.
//!
//! Reads tolerate both of the backend's casing conventions, exactly like
//! the storefront side. Writes always use the PascalCase convention the
//! backend's validators expect.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Listing endpoints answer either a bare array or `{"items": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged { items: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    /// Flatten to the item list either way.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paged { items } | Self::Plain(items) => items,
        }
    }
}

/// Product as the admin tables show it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminProduct {
    #[serde(default, alias = "Id")]
    pub id: Option<i32>,
    #[serde(default, alias = "Marca")]
    pub marca: Option<String>,
    #[serde(default, alias = "Modelo")]
    pub modelo: Option<String>,
    #[serde(default, alias = "Categoria")]
    pub categoria: Option<String>,
    #[serde(default, alias = "Img")]
    pub img: Option<String>,
}

/// Variant as the admin tables show it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminVariant {
    #[serde(default, alias = "Id")]
    pub id: Option<i32>,
    #[serde(default, rename = "productoId", alias = "ProductoId")]
    pub producto_id: Option<i32>,
    #[serde(default, alias = "Ram")]
    pub ram: Option<String>,
    #[serde(default, alias = "Almacenamiento")]
    pub almacenamiento: Option<String>,
    #[serde(default, alias = "Color")]
    pub color: Option<String>,
    #[serde(default, alias = "Precio")]
    pub precio: Option<Decimal>,
    #[serde(default, alias = "Stock")]
    pub stock: Option<u32>,
    #[serde(default, rename = "createdAt", alias = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Category record.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(default, alias = "Id")]
    pub id: Option<i32>,
    #[serde(default, alias = "Nombre")]
    pub nombre: Option<String>,
    #[serde(default, alias = "Descripcion")]
    pub descripcion: Option<String>,
}

/// Product create/update body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub marca: String,
    pub modelo: String,
    pub categoria: String,
    /// Base64 image payload, no data-URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

/// Variant create/update body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariantPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub producto_id: i32,
    pub ram: String,
    pub almacenamiento: String,
    pub color: String,
    pub precio: Decimal,
    pub stock: u32,
}

/// Category create/update body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub nombre: String,
    pub descripcion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_listing_accepts_both_shapes() {
        let plain: Listing<i32> = serde_json::from_str("[1,2,3]").expect("plain");
        assert_eq!(plain.into_items(), vec![1, 2, 3]);
        let paged: Listing<i32> = serde_json::from_str(r#"{"items":[4,5]}"#).expect("paged");
        assert_eq!(paged.into_items(), vec![4, 5]);
    }

    #[test]
    fn test_variant_payload_is_pascal_case() {
        let payload = VariantPayload {
            id: None,
            producto_id: 1,
            ram: "8GB".to_string(),
            almacenamiento: "128GB".to_string(),
            color: "negro".to_string(),
            precio: dec!(900),
            stock: 5,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["ProductoId"], 1);
        assert_eq!(json["Almacenamiento"], "128GB");
        // Unset id is omitted entirely, not sent as null
        assert!(json.get("Id").is_none());
    }

    #[test]
    fn test_admin_variant_accepts_both_casings() {
        let v: AdminVariant = serde_json::from_str(
            r#"{"Id":1,"ProductoId":2,"Ram":"8GB","Precio":900,"CreatedAt":"2025-01-05T10:00:00Z"}"#,
        )
        .expect("deserialize");
        assert_eq!(v.producto_id, Some(2));
        assert!(v.created_at.is_some());
    }
}
