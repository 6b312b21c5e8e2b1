//! Overview screen logic

pub mod form;
pub mod message;
pub mod overview;

pub use form::FilterForm;
pub use message::Message;
pub use overview::Overview;
