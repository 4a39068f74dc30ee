pub mod add;
pub mod add_dir;
pub mod cat;
pub mod get;
pub mod pin;
pub mod version;

pub use add::Add;
pub use add_dir::AddDir;
pub use cat::Cat;
pub use get::Get;
pub use pin::Pin;
pub use version::Version;
