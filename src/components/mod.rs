//! UI Components
//!
//! Grocery list views bound to the grocery model.

mod grocery_item;
mod grocery_input;
mod grocery_list;

pub use grocery_item::GroceryItem;
pub use grocery_input::GroceryInput;
pub use grocery_list::GroceryList;
