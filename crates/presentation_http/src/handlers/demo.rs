//! Demo API served behind the chaos layer
//!
//! Small, well-behaved endpoints whose only job is to be disrupted.

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price_cents: u64,
}

/// Order placement request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Order placement response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub product_id: u32,
    pub quantity: u32,
    pub total_cents: u64,
    pub created_at: DateTime<Utc>,
}

fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Banana".to_string(),
            price_cents: 99,
        },
        Product {
            id: 2,
            name: "Coconut".to_string(),
            price_cents: 349,
        },
        Product {
            id: 3,
            name: "Rubber chicken".to_string(),
            price_cents: 1299,
        },
    ]
}

/// List demo users
pub async fn list_users() -> Json<Vec<User>> {
    Json(vec![
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    ])
}

/// List demo products
pub async fn list_products() -> Json<Vec<Product>> {
    Json(catalog())
}

/// Place an order for a catalog product
pub async fn create_order(
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.quantity == 0 {
        return Err(ApiError::BadRequest("Quantity must be at least 1".to_string()));
    }
    let product = catalog()
        .into_iter()
        .find(|p| p.id == request.product_id)
        .ok_or_else(|| ApiError::NotFound(format!("product {}", request.product_id)))?;

    let order = OrderResponse {
        id: Uuid::now_v7(),
        product_id: product.id,
        quantity: request.quantity,
        total_cents: product.price_cents * u64::from(request.quantity),
        created_at: Utc::now(),
    };
    Ok((StatusCode::CREATED, Json(order)))
}

/// Minimal HTML page
pub async fn dashboard() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n<html><head><title>Dashboard</title></head>\
         <body><h1>Dashboard</h1><p>All systems nominal.</p></body></html>",
    )
}
