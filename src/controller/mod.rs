//! Screen state: lists, dialogs and the notices they raise.

pub mod dialog;
pub mod notice;
pub mod order_form;
pub mod order_manager;
pub mod product_manager;
pub mod user_manager;

pub use notice::{Notice, NoticeLevel};
pub use order_form::OrderForm;
pub use order_manager::OrderManager;
pub use product_manager::ProductManager;
pub use user_manager::UserManager;
