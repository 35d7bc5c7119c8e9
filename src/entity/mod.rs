pub mod carts;
pub mod categories;
pub mod food_tags;
pub mod foods;
pub mod line_items;
pub mod orders;
pub mod restaurants;
pub mod reviews;
pub mod tags;
pub mod vouchers;

pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use food_tags::Entity as FoodTags;
pub use foods::Entity as Foods;
pub use line_items::Entity as LineItems;
pub use orders::Entity as Orders;
pub use restaurants::Entity as Restaurants;
pub use reviews::Entity as Reviews;
pub use tags::Entity as Tags;
pub use vouchers::Entity as Vouchers;
