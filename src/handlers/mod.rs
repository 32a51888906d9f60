pub mod health;
pub mod verify;
pub mod fetch;
pub mod custom;
pub mod loader;
pub mod publish;
pub mod list;

pub use health::root_handler;
pub use verify::verify_handler;
pub use fetch::fetch_handler;
pub use custom::custom_handler;
pub use loader::loader_handler;
pub use publish::publish_handler;
pub use list::list_handler;
