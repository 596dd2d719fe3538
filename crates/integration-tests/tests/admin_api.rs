//! Integration tests for back-office catalog management.
//!
//! These tests require:
//! - The backend API running on `ORIGAMI_API_URL`
//! - `ORIGAMI_ADMIN_PASSWORD` set to the accepted password
//!
//! Run with: cargo test -p origami-integration-tests -- --ignored

use origami_admin::types::{CategoryPayload, ProductPayload, VariantPayload};
use origami_admin::{AdminClient, AdminConfig};
use rust_decimal::dec;
use uuid::Uuid;

/// An authenticated client with a throwaway session file.
fn authenticated_client() -> AdminClient {
    let mut config = AdminConfig::from_env().expect("load config");
    config.session_path =
        std::env::temp_dir().join(format!("origami-admin-{}.json", Uuid::new_v4()));
    let password = std::env::var("ORIGAMI_ADMIN_PASSWORD").expect("password in env");
    let username = config.username.clone();
    let client = AdminClient::new(config).expect("build client");
    client.login(&username, &password).expect("login");
    client
}

#[tokio::test]
#[ignore = "Requires running backend API"]
async fn test_category_create_list_delete() {
    let client = authenticated_client();
    let name = format!("test-{}", Uuid::new_v4());

    client
        .create_category(&CategoryPayload {
            id: None,
            nombre: name.clone(),
            descripcion: "integration test category".to_string(),
        })
        .await
        .expect("create category");

    let categories = client.categories().await.expect("list categories");
    let created = categories
        .iter()
        .find(|c| c.nombre.as_deref() == Some(name.as_str()))
        .expect("created category is listed");

    let id = created.id.expect("listed category has an id");
    client.delete_category(id).await.expect("delete category");
}

#[tokio::test]
#[ignore = "Requires running backend API"]
async fn test_product_and_variant_lifecycle() {
    let client = authenticated_client();
    let model = format!("Test {}", Uuid::new_v4());

    client
        .create_product(&ProductPayload {
            id: None,
            marca: "TestBrand".to_string(),
            modelo: model.clone(),
            categoria: "testbrand".to_string(),
            img: None,
        })
        .await
        .expect("create product");

    let products = client.products().await.expect("list products");
    let created = products
        .iter()
        .find(|p| p.modelo.as_deref() == Some(model.as_str()))
        .expect("created product is listed");
    let product_id = created.id.expect("listed product has an id");

    client
        .create_variant(&VariantPayload {
            id: None,
            producto_id: product_id,
            ram: "8GB".to_string(),
            almacenamiento: "128GB".to_string(),
            color: "negro".to_string(),
            precio: dec!(899.99),
            stock: 5,
        })
        .await
        .expect("create variant");

    let variants = client.variants(product_id).await.expect("list variants");
    assert_eq!(variants.len(), 1);
    let variant_id = variants[0].id.expect("listed variant has an id");

    client.delete_variant(variant_id).await.expect("delete variant");
    client.delete_product(product_id).await.expect("delete product");
}

#[tokio::test]
#[ignore = "Requires running backend API"]
async fn test_session_survives_a_new_client() {
    let mut config = AdminConfig::from_env().expect("load config");
    config.session_path =
        std::env::temp_dir().join(format!("origami-admin-{}.json", Uuid::new_v4()));
    let password = std::env::var("ORIGAMI_ADMIN_PASSWORD").expect("password in env");
    let username = config.username.clone();

    let first = AdminClient::new(config.clone()).expect("build client");
    first.login(&username, &password).expect("login");

    // A second client over the same session file is already authenticated.
    let second = AdminClient::new(config).expect("build client");
    second.products().await.expect("list with persisted session");
    second.logout().expect("logout");
}
