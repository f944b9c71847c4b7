//! `SeaORM` entities for the shared cluster store

pub mod node_info;

pub mod prelude {
    pub use super::node_info::Entity as NodeInfo;
}
