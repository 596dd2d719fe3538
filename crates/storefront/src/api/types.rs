//! Raw wire DTOs from the backend API.
//!
//! The collaborator is inconsistent about field casing - some endpoints
//! emit PascalCase (`Precio`), others camelCase (`precio`) - so every
//! field accepts both spellings. Nothing outside this module ever sees the
//! raw shape; [`super::conversions`] normalizes to the canonical types.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /api/Producto` and `GET /api/Producto/{id}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    #[serde(default, alias = "Id")]
    pub id: Option<i32>,
    #[serde(default, alias = "Marca")]
    pub marca: Option<String>,
    #[serde(default, alias = "Modelo")]
    pub modelo: Option<String>,
    #[serde(default, alias = "Categoria")]
    pub categoria: Option<String>,
    /// Base64 image payload, no data-URL prefix.
    #[serde(default, alias = "Img")]
    pub img: Option<String>,
    /// Inlined variants on the listing endpoint; absent on detail.
    #[serde(default, alias = "Variantes")]
    pub variantes: Vec<VariantDto>,
}

/// `GET /api/Producto/{id}/variantes` payload element.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantDto {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_accepts_pascal_case() {
        let dto: VariantDto = serde_json::from_str(
            r#"{"Id":3,"ProductoId":1,"Ram":"8GB","Almacenamiento":"128GB","Color":"negro","Precio":900,"Stock":5}"#,
        )
        .expect("deserialize");
        assert_eq!(dto.id, Some(3));
        assert_eq!(dto.ram.as_deref(), Some("8GB"));
        assert_eq!(dto.precio, Some(dec!(900)));
    }

    #[test]
    fn test_accepts_camel_case() {
        let dto: VariantDto = serde_json::from_str(
            r#"{"id":3,"productoId":1,"ram":"8GB","almacenamiento":"128GB","color":"negro","precio":900.5,"stock":5}"#,
        )
        .expect("deserialize");
        assert_eq!(dto.producto_id, Some(1));
        assert_eq!(dto.precio, Some(dec!(900.5)));
    }

    #[test]
    fn test_missing_fields_default() {
        let dto: ProductDto = serde_json::from_str(r#"{"id":1,"modelo":"iPhone 15"}"#)
            .expect("deserialize");
        assert_eq!(dto.id, Some(1));
        assert!(dto.marca.is_none());
        assert!(dto.variantes.is_empty());
    }
}
