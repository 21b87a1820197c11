use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "equips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub equip_model_id: Uuid,
    #[sea_orm(unique)]
    pub serial_number: String,
    pub reader_color: String,
    pub badge_type: String,
    pub details: Option<String>,
    pub proximity: bool,
    pub bio: bool,
    pub barcode: bool,
    pub cartographic: bool,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::equip_models::Entity",
        from = "Column::EquipModelId",
        to = "super::equip_models::Column::Id"
    )]
    EquipModel,
    #[sea_orm(has_many = "super::entry_equipments::Entity")]
    EntryEquipments,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::equip_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipModel.def()
    }
}

impl Related<super::entry_equipments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryEquipments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
