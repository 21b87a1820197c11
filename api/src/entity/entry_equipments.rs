use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entry_equipments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub equip_id: Uuid,
    pub external_damage: bool,
    pub details: Option<String>,
    pub defect: String,
    pub delivery: String,
    pub client_name: Option<String>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub sender_name: Option<String>,
    pub properly_packed: Option<bool>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub motoboy_name: Option<String>,
    pub responsible_name: Option<String>,
    pub technician_name: Option<String>,
    /// Process status, see `ProcessStatus`
    pub status: String,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equips::Entity",
        from = "Column::EquipId",
        to = "super::equips::Column::Id"
    )]
    Equip,
    #[sea_orm(has_many = "super::entry_accessories::Entity")]
    EntryAccessories,
}

impl Related<super::equips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equip.def()
    }
}

impl Related<super::entry_accessories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryAccessories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
