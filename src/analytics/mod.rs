//! Aggregates and reports computed purely from a record snapshot.

pub mod reports;
pub mod summary;

pub use reports::{
    at_risk, class_statistics, course_breakdown, top_performers, ClassStatistics, CourseStatus,
    CourseSummary, GpaDistribution,
};
pub use summary::{summarize, Stats, NO_TOP_STUDENT};
