pub mod seasoning;
pub mod seasoning_template;
pub mod seasoning_type;
pub mod template_seasoning;
