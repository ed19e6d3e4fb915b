//! Plain-text email templates.

use super::MailMessage;
use crate::models::NewApplication;

/// Course-specific wording shared by both templates.
#[derive(Debug, Clone)]
pub struct MailTemplates {
    course_title: String,
    signature: String,
}

impl MailTemplates {
    pub fn new(course_title: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            course_title: course_title.into(),
            signature: signature.into(),
        }
    }

    /// Confirmation sent to the applicant.
    pub fn applicant_confirmation(&self, from: &str, app: &NewApplication) -> MailMessage {
        let body = format!(
            "Hi {name},\n\
             \n\
             Thank you for applying to the one-to-one {course}.\n\
             We received your application and will contact you soon to schedule the session.\n\
             \n\
             Summary:\n\
             - Platforms of interest: {platforms}\n\
             - Preferred times: {times}\n\
             \n\
             Best regards,\n\
             {signature}\n",
            name = app.name,
            course = self.course_title,
            platforms = join_or(&app.platforms, "None"),
            times = join_or(&app.preferred_times, "None"),
            signature = self.signature,
        );

        MailMessage {
            from: from.to_string(),
            to: app.email.clone(),
            subject: format!("Thanks for applying — {}", self.course_title),
            body,
        }
    }

    /// Alert sent to the course administrator.
    pub fn admin_alert(&self, from: &str, to: &str, app: &NewApplication) -> MailMessage {
        let body = format!(
            "New applicant:\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Experience: {experience}\n\
             Platforms: {platforms}\n\
             Timezone: {timezone}\n\
             Preferred times: {times}\n\
             Goals: {goals}\n",
            name = app.name,
            email = app.email,
            phone = or_na(&app.phone),
            experience = or_na(&app.experience),
            platforms = join_or(&app.platforms, "N/A"),
            timezone = or_na(&app.timezone),
            times = join_or(&app.preferred_times, "N/A"),
            goals = app.goals,
        );

        MailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("New Course Application from {}", app.name),
            body,
        }
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
