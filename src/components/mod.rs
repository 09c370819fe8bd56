pub mod fetch_status;
pub mod footer;
pub mod header;
pub mod highlight;
pub mod markdown;
pub mod toast;
pub mod ui;
