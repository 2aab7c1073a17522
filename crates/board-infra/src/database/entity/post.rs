//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::StringLen;

use board_core::domain::{Post, Writer};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub writer_id: String,
    #[sea_orm(column_type = "String(StringLen::N(4096))")]
    pub content: String,
    pub view_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach the joined category row and produce the Domain Post, which
    /// carries its category eagerly.
    pub fn into_domain(self, category: super::category::Model) -> Post {
        Post {
            id: self.id,
            category: category.into(),
            title: self.title,
            writer: Writer { id: self.writer_id },
            content: self.content,
            view_count: self.view_count,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel. An unpersisted post
/// (id 0) leaves the key unset so the database assigns it.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: if post.id == 0 { NotSet } else { Set(post.id) },
            category_id: Set(post.category.id),
            title: Set(post.title),
            writer_id: Set(post.writer.id),
            content: Set(post.content),
            view_count: Set(post.view_count),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
