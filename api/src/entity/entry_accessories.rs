use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entry_accessories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub entry_equipment_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub accessory_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entry_equipments::Entity",
        from = "Column::EntryEquipmentId",
        to = "super::entry_equipments::Column::Id",
        on_delete = "Cascade"
    )]
    EntryEquipment,
    #[sea_orm(
        belongs_to = "super::accessories::Entity",
        from = "Column::AccessoryId",
        to = "super::accessories::Column::Id"
    )]
    Accessory,
}

impl Related<super::entry_equipments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
