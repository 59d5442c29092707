pub mod search_files;
