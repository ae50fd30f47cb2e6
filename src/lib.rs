//! Project planning with a scrollable, draggable Gantt chart.

pub mod chart;
pub mod dates;
pub mod io;
pub mod model;
pub mod settings;
