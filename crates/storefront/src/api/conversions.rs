//! Boundary normalization from wire DTOs to canonical types.
//!
//! This is the only place the collaborator's inconsistencies are handled;
//! past here every record has one shape. Variants missing an axis label,
//! an ID, or a price are dropped (the storefront cannot render or sell
//! them), matching how the pages have always skipped blank option values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use origami_core::{Price, ProductId, VariantId};
use tracing::debug;

use super::types::{ProductDto, VariantDto};
use crate::browse::ProductCard;
use crate::catalog::{Product, Variant};

/// Normalize a product detail payload. `None` when the record has no ID.
pub fn convert_product(dto: ProductDto) -> Option<Product> {
    let id = ProductId::new(dto.id?);
    Some(Product {
        id,
        brand: dto.marca.unwrap_or_default(),
        model: dto.modelo.unwrap_or_default(),
        category: dto.categoria.unwrap_or_default().to_lowercase(),
        image_url: dto.img.as_deref().and_then(image_data_url),
    })
}

/// Normalize one variant. `None` drops the record.
pub fn convert_variant(product_id: ProductId, dto: VariantDto) -> Option<Variant> {
    let id = VariantId::new(dto.id?);
    let memory = non_blank(dto.ram)?;
    let storage = non_blank(dto.almacenamiento)?;
    let color = non_blank(dto.color)?;
    let unit_price = dto.precio.map(Price::new)?;
    Some(Variant {
        id,
        product_id: dto.producto_id.map_or(product_id, ProductId::new),
        memory,
        storage,
        color,
        unit_price,
        stock: dto.stock.unwrap_or(0),
    })
}

/// Normalize a listing entry into a browse card. The card price is the
/// cheapest inlined variant; products without variants show no price.
pub fn convert_card(dto: ProductDto) -> Option<ProductCard> {
    let base_price = dto
        .variantes
        .iter()
        .filter_map(|v| v.precio)
        .min()
        .map(Price::new);
    let image_url = dto.img.as_deref().and_then(image_data_url);
    let id = ProductId::new(dto.id?);
    let title = format!(
        "{} {}",
        dto.marca.unwrap_or_default(),
        dto.modelo.unwrap_or_default()
    )
    .trim()
    .to_string();
    Some(ProductCard {
        id,
        title,
        category: dto.categoria.unwrap_or_default().to_lowercase(),
        base_price,
        image_url,
    })
}

/// Build a `data:` URL from the API's base64 image payload, dropping
/// payloads that do not decode.
fn image_data_url(payload: &str) -> Option<String> {
    if BASE64.decode(payload).is_err() {
        debug!("dropping undecodable image payload");
        return None;
    }
    Some(format!("data:image/png;base64,{payload}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn variant_dto(json: &str) -> VariantDto {
        serde_json::from_str(json).expect("deserialize")
    }

    #[test]
    fn test_variant_normalizes_both_casings() {
        let pascal = variant_dto(
            r#"{"Id":1,"Ram":"8GB","Almacenamiento":"128GB","Color":"negro","Precio":900,"Stock":5}"#,
        );
        let camel = variant_dto(
            r#"{"id":1,"ram":"8GB","almacenamiento":"128GB","color":"negro","precio":900,"stock":5}"#,
        );
        let a = convert_variant(ProductId::new(1), pascal).expect("variant");
        let b = convert_variant(ProductId::new(1), camel).expect("variant");
        assert_eq!(a, b);
        assert_eq!(a.memory, "8GB");
        assert_eq!(a.unit_price, Price::new(dec!(900)));
    }

    #[test]
    fn test_variant_without_axis_label_is_dropped() {
        let dto = variant_dto(r#"{"id":1,"ram":"8GB","color":"negro","precio":900,"stock":5}"#);
        assert!(convert_variant(ProductId::new(1), dto).is_none());
        let blank =
            variant_dto(r#"{"id":1,"ram":" ","almacenamiento":"128GB","color":"negro","precio":900}"#);
        assert!(convert_variant(ProductId::new(1), blank).is_none());
    }

    #[test]
    fn test_missing_stock_defaults_to_zero() {
        let dto = variant_dto(
            r#"{"id":1,"ram":"8GB","almacenamiento":"128GB","color":"negro","precio":900}"#,
        );
        let v = convert_variant(ProductId::new(1), dto).expect("variant");
        assert_eq!(v.stock, 0);
    }

    #[test]
    fn test_card_price_is_cheapest_variant() {
        let dto: ProductDto = serde_json::from_str(
            r#"{"id":1,"marca":"Apple","modelo":"iPhone 15","categoria":"Apple",
                "variantes":[{"precio":1100},{"precio":900},{"precio":1400}]}"#,
        )
        .expect("deserialize");
        let card = convert_card(dto).expect("card");
        assert_eq!(card.title, "Apple iPhone 15");
        assert_eq!(card.category, "apple");
        assert_eq!(card.base_price, Some(Price::new(dec!(900))));
    }

    #[test]
    fn test_bad_image_payload_is_dropped() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"id":1,"img":"not base64!!"}"#).expect("deserialize");
        let product = convert_product(dto).expect("product");
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_good_image_payload_becomes_data_url() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"id":1,"img":"aGVsbG8="}"#).expect("deserialize");
        let product = convert_product(dto).expect("product");
        assert_eq!(
            product.image_url.as_deref(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }
}
