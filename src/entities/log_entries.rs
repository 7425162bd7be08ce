use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "log_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Sanitized filename inside the upload directory, if an image was attached
    pub image_file: Option<String>,

    pub description: Option<String>,

    /// RFC 3339, set once at creation
    pub created_at: String,

    /// RFC 3339, touched on every edit
    pub updated_at: String,

    /// Owning user, fixed at creation
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
