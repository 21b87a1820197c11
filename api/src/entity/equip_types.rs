use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "equip_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// `catraca`, `relogio`, `controleAcesso`, `peca` or `sirene`
    #[sea_orm(unique)]
    pub kind: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::equip_marks::Entity")]
    EquipMarks,
}

impl Related<super::equip_marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipMarks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
