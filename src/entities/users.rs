use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name shown in page headers
    pub name: String,

    /// Login identifier, unset until the admin account is provisioned
    #[sea_orm(unique)]
    pub username: Option<String>,

    /// Argon2id password hash (PHC string)
    pub password_hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
