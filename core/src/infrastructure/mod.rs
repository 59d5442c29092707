pub mod box_api;
