pub mod dashboard;
pub mod dialogs;
pub mod gantt_chart;
pub mod task_table;
pub mod theme;
pub mod toolbar;
pub mod vacation_panel;
