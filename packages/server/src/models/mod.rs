pub mod seasoning;
pub mod seasoning_type;
pub mod shared;
pub mod template;
