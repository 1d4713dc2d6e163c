pub mod progress_bar;
pub mod query_input;
pub mod status_bar;
pub mod toast;
