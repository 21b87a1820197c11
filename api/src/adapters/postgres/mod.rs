//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod account_repo;
pub mod accessory_repo;
pub mod analysis_repo;
pub mod company_repo;
pub mod entry_equipment_repo;
pub mod equip_catalog_repo;
pub mod equip_repo;
pub mod part_repo;
pub mod schema;


use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryOrder, Select};

use crate::domain::entities::{ListQuery, SortField};

pub use account_repo::{
    PostgresSessionRepository, PostgresTypeAccountRepository, PostgresUserRepository,
};
pub use accessory_repo::PostgresAccessoryRepository;
pub use analysis_repo::PostgresAnalysisRepository;
pub use company_repo::PostgresCompanyRepository;
pub use entry_equipment_repo::PostgresEntryEquipmentRepository;
pub use equip_catalog_repo::PostgresEquipCatalogRepository;
pub use equip_repo::PostgresEquipRepository;
pub use part_repo::PostgresPartRepository;
pub use schema::ensure_schema;

/// Order a listing by the column the query asks for
pub(crate) fn ordered<E: EntityTrait>(
    select: Select<E>,
    query: &ListQuery,
    created_at: E::Column,
    updated_at: E::Column,
) -> Select<E> {
    let column = match query.sort_field() {
        SortField::CreatedAt => created_at,
        SortField::UpdatedAt => updated_at,
    };
    let order = if query.ascending() {
        Order::Asc
    } else {
        Order::Desc
    };
    select.order_by(column, order)
}

/// Case-insensitive substring match
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(format!("%{}%", value.to_lowercase()))
}

/// Case-insensitive equality
pub(crate) fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column)))).eq(value.to_lowercase())
}
