pub mod input_field;
pub mod progress_bar;
pub mod quiz_panel;
pub mod settings_panel;
pub mod stats_panel;
pub mod tab_bar;
pub mod variant_panel;
