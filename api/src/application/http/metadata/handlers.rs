pub mod get_template_schema;
pub mod list_templates;
