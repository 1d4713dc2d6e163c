pub mod controls;
pub mod history_list;
pub mod now_playing;
pub mod retry_prompt;
pub mod seek_bar;
