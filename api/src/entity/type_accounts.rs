use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "type_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub type_name: String,
    pub add_company: bool,
    pub add_part: bool,
    pub add_analyze: bool,
    pub add_equip: bool,
    pub add_entry: bool,
    pub add_equip_type: bool,
    pub tecnico: bool,
    pub add_accessories: bool,
    pub add_user: bool,
    pub add_type_account: bool,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
