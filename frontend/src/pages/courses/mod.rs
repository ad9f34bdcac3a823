mod panel;
pub mod utils;

pub use panel::CoursesPage;
