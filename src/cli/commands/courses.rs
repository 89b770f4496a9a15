//! Courses command implementation.

use crate::cli::Output;
use crate::session::CourseSession;
use anyhow::Result;

/// Run the courses command.
pub async fn run_courses(session: &CourseSession) -> Result<()> {
    let stats = session.course_stats().await?;

    if stats.total_courses == 0 {
        Output::info("The course library is empty.");
        return Ok(());
    }

    Output::header(&format!("Courses ({})", stats.total_courses));
    println!();
    for title in &stats.course_titles {
        Output::list_item(title);
    }

    Ok(())
}
