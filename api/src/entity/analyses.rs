use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub entry_equipment_id: Uuid,
    pub observations: String,
    /// Cents
    pub total_price: i64,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::entry_equipments::Entity",
        from = "Column::EntryEquipmentId",
        to = "super::entry_equipments::Column::Id"
    )]
    EntryEquipment,
    #[sea_orm(has_many = "super::analysis_parts::Entity")]
    AnalysisParts,
}

impl Related<super::entry_equipments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryEquipment.def()
    }
}

impl Related<super::analysis_parts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalysisParts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
