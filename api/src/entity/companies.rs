use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub razao_social: String,
    /// Digits only
    #[sea_orm(unique)]
    pub cnpj: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub neighborhood: String,
    pub reference_point: Option<String>,
    pub zip_code: String,
    pub telephone: String,
    pub email: String,
    pub name_contact: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::equips::Entity")]
    Equips,
}

impl Related<super::equips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
