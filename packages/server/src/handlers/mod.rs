pub mod seasoning;
pub mod seasoning_type;
pub mod template;
