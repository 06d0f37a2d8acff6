//! Prompt text.

/// Standing instruction for the chat assistant.
pub const ASSISTANT_INSTRUCTION: &str = "You are an expert school administrative assistant and \
educational consultant. Help the user with school management tasks, lesson planning, and student \
behavioral advice.";

/// The assistant's opening turn.
pub const GREETING: &str = "Hello! I'm your EduPulse AI Assistant. How can I help you today? I can \
help with lesson planning, student performance analysis, or administrative tasks.";

/// Prompt for a student performance summary. `context` is the one-line
/// GPA/attendance/subjects summary.
#[must_use]
pub fn student_report(student_name: &str, context: &str) -> String {
    format!(
        "Generate a brief, encouraging academic performance summary for a student named \
         {student_name}.\nContext: {context}.\nFocus on strengths and areas for improvement. \
         Format with bullet points."
    )
}

/// Prompt for a four-week course syllabus.
#[must_use]
pub fn course_syllabus(course_title: &str, description: &str) -> String {
    format!(
        "Create a professional and structured course syllabus for \"{course_title}\".\n\
         Course Description: {description}.\n\
         Include:\n\
         1. Course Objectives\n\
         2. Learning Outcomes\n\
         3. A weekly breakdown (4 weeks)\n\
         Format using clear headings and bullet points."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_report_prompt() {
        let prompt = student_report("Alice Johnson", "GPA: 3.8");
        assert!(prompt.starts_with(
            "Generate a brief, encouraging academic performance summary for a student named Alice Johnson."
        ));
        assert!(prompt.contains("Context: GPA: 3.8."));
        assert!(prompt.ends_with("Format with bullet points."));
    }

    #[test]
    fn test_course_syllabus_prompt() {
        let prompt = course_syllabus("Calculus II", "Series");
        assert!(prompt.contains("syllabus for \"Calculus II\"."));
        assert!(prompt.contains("Course Description: Series."));
        assert!(prompt.contains("3. A weekly breakdown (4 weeks)"));
    }

    #[test]
    fn test_instruction_text() {
        assert!(ASSISTANT_INSTRUCTION.contains("administrative assistant and educational"));
        assert!(GREETING.starts_with("Hello! I'm your EduPulse AI Assistant."));
    }
}
