#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use opsboard_api::{
    config::AppConfig,
    db,
    entities::{company, daily_sale, holiday, product_raw_material, raw_material, resale_product},
    AppState,
};

/// Application harness backed by a private in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub group_id: Uuid,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // one connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.cors_allow_any_origin = true;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = opsboard_api::app_router(state.clone());

        Self {
            router,
            state,
            group_id: Uuid::new_v4(),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn create_company(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        company::ActiveModel {
            id: Set(id),
            group_id: Set(self.group_id),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert company");
        id
    }

    pub async fn create_product(&self, product: NewProduct<'_>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        resale_product::ActiveModel {
            id: Set(id),
            group_id: Set(self.group_id),
            company_id: Set(product.company_id),
            name: Set(product.name.to_string()),
            sku: Set(product.sku.map(str::to_string)),
            current_stock: Set(product.current_stock),
            min_stock: Set(product.min_stock),
            conversion_factor: Set(product.conversion_factor),
            purchase_unit: Set(Some("box".to_string())),
            active: Set(product.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert product");
        id
    }

    pub async fn create_material(&self, material: NewMaterial<'_>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        raw_material::ActiveModel {
            id: Set(id),
            group_id: Set(self.group_id),
            company_id: Set(material.company_id),
            parent_id: Set(material.parent_id),
            name: Set(material.name.to_string()),
            stock_unit: Set(Some("kg".to_string())),
            current_stock: Set(material.current_stock),
            min_stock: Set(material.min_stock),
            conversion_factor: Set(material.conversion_factor),
            purchase_unit: Set(Some("sack".to_string())),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert raw material");
        id
    }

    pub async fn link(&self, product_id: Uuid, raw_material_id: Uuid, quantity_per_unit: f64) {
        product_raw_material::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            raw_material_id: Set(raw_material_id),
            quantity_per_unit: Set(quantity_per_unit),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert link");
    }

    pub async fn record_sale(
        &self,
        product_id: Uuid,
        company_id: Option<Uuid>,
        sale_date: NaiveDate,
        quantity: f64,
    ) {
        daily_sale::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_id: Set(self.group_id),
            company_id: Set(company_id),
            product_id: Set(product_id),
            sale_date: Set(sale_date),
            quantity: Set(quantity),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert sale");
    }

    pub async fn add_holiday(&self, date: NaiveDate, recurring: bool) {
        holiday::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_id: Set(self.group_id),
            holiday_date: Set(date),
            name: Set("Holiday".to_string()),
            recurring: Set(recurring),
        }
        .insert(&*self.state.db)
        .await
        .expect("insert holiday");
    }
}

pub struct NewProduct<'a> {
    pub name: &'a str,
    pub sku: Option<&'a str>,
    pub company_id: Option<Uuid>,
    pub current_stock: f64,
    pub min_stock: f64,
    pub conversion_factor: f64,
    pub active: bool,
}

impl<'a> NewProduct<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            sku: None,
            company_id: None,
            current_stock: 100.0,
            min_stock: 0.0,
            conversion_factor: 1.0,
            active: true,
        }
    }
}

pub struct NewMaterial<'a> {
    pub name: &'a str,
    pub parent_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub current_stock: f64,
    pub min_stock: f64,
    pub conversion_factor: f64,
}

impl<'a> NewMaterial<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            parent_id: None,
            company_id: None,
            current_stock: 10.0,
            min_stock: 0.0,
            conversion_factor: 1.0,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
