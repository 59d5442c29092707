pub mod check_permissions;
pub mod download_file;
pub mod get_file_metadata;
pub mod get_folder_info;
pub mod get_preview;
pub mod list_folder_items;
