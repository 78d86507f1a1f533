use crate::domain::ports::FormSubmission;
use crate::domain::roi::{self, RoiInput, RoiResult};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_range, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four marketing-site forms the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Contact,
    Roi,
    CultureQuiz,
    QuizEmail,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::Contact,
        FormKind::Roi,
        FormKind::CultureQuiz,
        FormKind::QuizEmail,
    ];

    /// Collection name in the document store.
    pub fn collection(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Roi => "roi",
            FormKind::CultureQuiz => "culture-quiz",
            FormKind::QuizEmail => "quiz-email",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for FormKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contact" => Ok(FormKind::Contact),
            "roi" => Ok(FormKind::Roi),
            "culture-quiz" => Ok(FormKind::CultureQuiz),
            "quiz-email" => Ok(FormKind::QuizEmail),
            other => Err(GatewayError::UnknownKind(other.to_string())),
        }
    }
}

/// One stored submission: the raw payload plus whatever the form evaluated to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDocument {
    pub id: String,
    pub kind: FormKind,
    pub received_at: DateTime<Utc>,
    pub payload: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl SubmissionDocument {
    pub fn new(
        kind: FormKind,
        payload: serde_json::Value,
        result: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            received_at: Utc::now(),
            payload,
            result,
        }
    }
}

/// One page of stored submissions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    pub items: Vec<SubmissionDocument>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Subject and body of an internal notification; the pipeline fills in the
/// addresses from configuration.
#[derive(Debug, Clone)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// A fully addressed email handed to the mail transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

impl Validate for ContactSubmission {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_email("email", &self.email)?;
        validate_non_empty_string("message", &self.message)?;
        Ok(())
    }
}

impl FormSubmission for ContactSubmission {
    type Outcome = serde_json::Value;

    const KIND: FormKind = FormKind::Contact;

    fn evaluate(&self) -> Option<Self::Outcome> {
        None
    }

    fn notification(&self, _outcome: Option<&Self::Outcome>) -> Notification {
        let mut body = format!(
            "New contact form submission\n\nName: {}\nEmail: {}\n",
            self.name, self.email
        );
        if let Some(phone) = &self.phone_number {
            body.push_str(&format!("Phone: {}\n", phone));
        }
        if let Some(company) = &self.company {
            body.push_str(&format!("Company: {}\n", company));
        }
        body.push_str(&format!("\nMessage:\n{}\n", self.message));

        Notification {
            subject: format!("New contact form submission from {}", self.name),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// ROI calculator form
// ---------------------------------------------------------------------------

/// ROI calculator payload: the business figures plus contact fields that play
/// no part in the calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiSubmission {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(flatten)]
    pub input: RoiInput,
}

impl Validate for RoiSubmission {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)?;
        self.input.validate()
    }
}

impl FormSubmission for RoiSubmission {
    type Outcome = RoiResult;

    const KIND: FormKind = FormKind::Roi;

    fn evaluate(&self) -> Option<Self::Outcome> {
        Some(roi::compute(&self.input))
    }

    fn notification(&self, outcome: Option<&Self::Outcome>) -> Notification {
        let mut body = format!(
            "New ROI calculator submission\n\nEmail: {}\nPhone: {}\n\n\
             Employees: {}\nAvg annual salary: {:.2}\nAnnual revenue: {:.2}\n\
             Employees who left: {}\nExtra absenteeism days: {}\nEngagement score: {}\n",
            self.email,
            self.phone_number.as_deref().unwrap_or("-"),
            self.input.num_employees,
            self.input.avg_annual_salary,
            self.input.annual_revenue,
            self.input.employees_who_left,
            self.input.avg_extra_absenteeism_days_per_employee,
            self.input.engagement_score,
        );
        if let Some(result) = outcome {
            body.push_str(&format!(
                "\nTotal turnover cost: {:.2}\nTotal disengagement cost: {:.2}\n\
                 Total absenteeism cost: {:.2}\nTotal hidden loss: {:.2}\n\
                 Potential savings: {:.2} - {:.2}\nPotential revenue increase: {:.2} - {:.2}\n",
                result.total_turnover_cost,
                result.total_disengagement_cost,
                result.total_absenteeism_cost,
                result.total_hidden_loss,
                result.potential_savings_min,
                result.potential_savings_max,
                result.potential_revenue_increase_min,
                result.potential_revenue_increase_max,
            ));
        }

        Notification {
            subject: format!("New ROI calculator submission from {}", self.email),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Culture quiz form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question: String,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureQuizSubmission {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureQuizResult {
    pub average_score: f64,
    pub profile: String,
}

impl CultureQuizSubmission {
    fn average_score(&self) -> f64 {
        let sum: u32 = self.answers.iter().map(|a| u32::from(a.score)).sum();
        f64::from(sum) / self.answers.len() as f64
    }
}

/// Profile band for an average answer score on the 1-5 scale.
pub fn culture_profile(average_score: f64) -> &'static str {
    if average_score >= 4.2 {
        "thriving"
    } else if average_score >= 3.4 {
        "healthy"
    } else if average_score >= 2.6 {
        "developing"
    } else {
        "at-risk"
    }
}

impl Validate for CultureQuizSubmission {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)?;
        if self.answers.is_empty() {
            return Err(GatewayError::Validation {
                field: "answers".to_string(),
                reason: "at least one answer is required".to_string(),
            });
        }
        for (index, answer) in self.answers.iter().enumerate() {
            validate_non_empty_string(&format!("answers[{}].question", index), &answer.question)?;
            validate_range(&format!("answers[{}].score", index), answer.score, 1, 5)?;
        }
        Ok(())
    }
}

impl FormSubmission for CultureQuizSubmission {
    type Outcome = CultureQuizResult;

    const KIND: FormKind = FormKind::CultureQuiz;

    fn evaluate(&self) -> Option<Self::Outcome> {
        let average_score = self.average_score();
        Some(CultureQuizResult {
            average_score,
            profile: culture_profile(average_score).to_string(),
        })
    }

    fn notification(&self, outcome: Option<&Self::Outcome>) -> Notification {
        let mut body = format!(
            "New culture quiz submission\n\nEmail: {}\nCompany: {}\nAnswers: {}\n",
            self.email,
            self.company.as_deref().unwrap_or("-"),
            self.answers.len(),
        );
        if let Some(result) = outcome {
            body.push_str(&format!(
                "\nAverage score: {:.2}\nProfile: {}\n",
                result.average_score, result.profile
            ));
        }

        Notification {
            subject: format!("New culture quiz submission from {}", self.email),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Quiz email capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizEmailSubmission {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Validate for QuizEmailSubmission {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)
    }
}

impl FormSubmission for QuizEmailSubmission {
    type Outcome = serde_json::Value;

    const KIND: FormKind = FormKind::QuizEmail;

    fn evaluate(&self) -> Option<Self::Outcome> {
        None
    }

    fn notification(&self, _outcome: Option<&Self::Outcome>) -> Notification {
        let mut body = format!("New quiz email capture\n\nEmail: {}\n", self.email);
        if let Some(quiz) = &self.quiz {
            body.push_str(&format!("Quiz: {}\n", quiz));
        }
        if let Some(score) = self.score {
            body.push_str(&format!("Score: {}\n", score));
        }

        Notification {
            subject: format!("New quiz email capture: {}", self.email),
            body,
        }
    }
}
