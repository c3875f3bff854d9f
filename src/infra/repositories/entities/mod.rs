//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod academic_year;
pub mod course;
pub mod department;
pub mod faculty_profile;
pub mod student_profile;
