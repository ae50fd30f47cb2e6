pub mod config;
pub mod normalize;
pub mod project;
pub mod stats;
pub mod task;
pub mod vacation;

pub use config::{ChartSettings, FitSettings, PerViewMode, RangePadding, RenderConfig, ViewMode};
pub use project::{Project, SortOrder, VacationRejection};
pub use stats::ProjectStats;
pub use task::{Task, TaskStatus};
pub use vacation::Vacation;
