use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "equip_models")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub equip_mark_id: Uuid,
    pub model: String,
    pub description: String,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equip_marks::Entity",
        from = "Column::EquipMarkId",
        to = "super::equip_marks::Column::Id"
    )]
    EquipMark,
    #[sea_orm(has_many = "super::equips::Entity")]
    Equips,
}

impl Related<super::equip_marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipMark.def()
    }
}

impl Related<super::equips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
