pub mod filter;
pub mod item;
pub mod list;

pub use filter::FilterMode;
pub use item::TodoItem;
pub use list::TodoList;
