use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub item: String,
    pub description: String,
    /// Cents
    pub cost_price: i64,
    /// Cents
    pub sale_price: i64,
    pub obsolete: bool,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::part_equip_models::Entity")]
    PartEquipModels,
}

impl Related<super::part_equip_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartEquipModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
