//! Sales records.
//!
//! A `Record` is one persisted sales transaction. `id` is generated by the
//! storage on insert and never written by clients.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub field_of_activity: Option<String>,
    pub doctor_name: String,
    pub country: String,
    pub state: String,
    pub application: String,
    pub product_name: String,
    pub sales: f64,
    pub quantity: Option<i32>,
    pub discount: Option<f64>,
    pub profit: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: DateTimeUtc,
    pub field_of_activity: Option<String>,
    pub doctor_name: String,
    pub country: String,
    pub state: String,
    pub application: String,
    pub product_name: String,
    pub sales: f64,
    pub quantity: Option<i32>,
    pub discount: Option<f64>,
    pub profit: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Record {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            field_of_activity: model.field_of_activity,
            doctor_name: model.doctor_name,
            country: model.country,
            state: model.state,
            application: model.application,
            product_name: model.product_name,
            sales: model.sales,
            quantity: model.quantity,
            discount: model.discount,
            profit: model.profit,
        }
    }
}
