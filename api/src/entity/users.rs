use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub type_account_id: Uuid,
    pub responsible_user: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::type_accounts::Entity",
        from = "Column::TypeAccountId",
        to = "super::type_accounts::Column::Id"
    )]
    TypeAccount,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::type_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeAccount.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
