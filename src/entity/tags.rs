use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::food_tags::Entity")]
    FoodTags,
}

impl Related<super::food_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodTags.def()
    }
}

impl Related<super::foods::Entity> for Entity {
    fn to() -> RelationDef {
        super::food_tags::Relation::Foods.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::food_tags::Relation::Tags.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
