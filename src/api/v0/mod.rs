pub mod add;
pub mod cat;
pub mod ls;
pub mod pin;
