pub mod alert_popup;
pub mod budget_card;
pub mod delete_confirmation;
pub mod empty_state;
pub mod filter_input;
pub mod forms;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod popup;
pub mod screen_title;
pub mod stat_card;
pub mod toasts;
