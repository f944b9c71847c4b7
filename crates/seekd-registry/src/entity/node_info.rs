//! `SeaORM` Entity for node_info table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "node_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cluster_name: String,
    pub server_address: String,
    pub membership_port: i32,
    pub service_port: i32,
    pub rest_port: i32,
    pub gmt_create: DateTime,
    pub gmt_modified: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
