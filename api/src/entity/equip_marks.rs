use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "equip_marks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub equip_type_id: Uuid,
    pub mark: String,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equip_types::Entity",
        from = "Column::EquipTypeId",
        to = "super::equip_types::Column::Id"
    )]
    EquipType,
    #[sea_orm(has_many = "super::equip_models::Entity")]
    EquipModels,
}

impl Related<super::equip_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipType.def()
    }
}

impl Related<super::equip_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
