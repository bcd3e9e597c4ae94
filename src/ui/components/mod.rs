pub mod leaderboard;
pub mod progress_bar;
pub mod result_panel;
pub mod stats_sidebar;
pub mod typing_area;
