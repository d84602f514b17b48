//! Form sessions — the presentation state behind one intake form.
//!
//! A session holds what the form shows: the fields, the demo toggle, the
//! loading flag, and the last displayed results or error. Submissions are
//! split into `begin_submit` / `finish_submit` so the store lock is never held
//! across an outbound call.

pub mod handlers;
pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::{ClientIntake, IntakePatch};
use crate::recommendations::{OutputSource, RecommendationOutcome};
use crate::render::print_document;

pub use store::SessionStore;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub intake: ClientIntake,
    pub demo_mode: bool,
    pub loading: bool,
    pub recommendations: Option<String>,
    pub functions_used: Vec<String>,
    /// Where the displayed results came from; independent of the current toggle.
    pub results_source: Option<OutputSource>,
    pub warnings: Vec<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot taken when a submission starts.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub intake: ClientIntake,
    pub demo_mode: bool,
}

/// Labels that depend on the running configuration rather than the session.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    pub provider: &'static str,
    pub places_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub can_submit: bool,
    pub status_message: String,
    pub loading_message: Option<String>,
    pub error_hint: Option<String>,
}

impl Session {
    pub fn new(demo_mode: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            intake: ClientIntake::default(),
            demo_mode,
            loading: false,
            recommendations: None,
            functions_used: Vec::new(),
            results_source: None,
            warnings: Vec::new(),
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.intake.can_submit()
    }

    pub fn update_intake(&mut self, patch: IntakePatch) {
        self.intake.apply(patch);
        self.touch();
    }

    /// Only affects the next submission; displayed results stay as they are.
    pub fn set_demo_mode(&mut self, demo_mode: bool) {
        self.demo_mode = demo_mode;
        self.touch();
    }

    /// Fills the form from an example. Never submits.
    pub fn apply_example(&mut self, index: usize) -> Result<(), AppError> {
        self.intake.apply_example(index)?;
        self.touch();
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, AppError> {
        if self.loading {
            return Err(AppError::Conflict(
                "A submission is already in progress for this session".to_string(),
            ));
        }
        self.intake.validate()?;

        self.loading = true;
        self.recommendations = None;
        self.functions_used.clear();
        self.results_source = None;
        self.warnings.clear();
        self.error = None;
        self.touch();

        Ok(SubmitTicket {
            intake: self.intake.clone(),
            demo_mode: self.demo_mode,
        })
    }

    pub fn finish_submit(&mut self, result: Result<RecommendationOutcome, AppError>) {
        self.loading = false;
        match result {
            Ok(outcome) => {
                self.recommendations = Some(outcome.recommendations);
                self.functions_used = outcome.functions_used;
                self.results_source = Some(outcome.source);
                self.warnings = outcome.warnings;
            }
            Err(e) => {
                self.error = Some(format!("Error: {}", e.display_message()));
            }
        }
        self.touch();
    }

    /// The displayed recommendations, verbatim.
    pub fn copy_text(&self) -> Result<&str, AppError> {
        self.recommendations
            .as_deref()
            .ok_or_else(|| AppError::NotFound("No recommendations to copy".to_string()))
    }

    pub fn print_document(&self) -> Result<String, AppError> {
        self.recommendations
            .as_deref()
            .map(print_document)
            .ok_or_else(|| AppError::NotFound("No recommendations to print".to_string()))
    }

    pub fn view(&self, ctx: ViewContext) -> SessionView {
        let status_message = if self.demo_mode {
            "Demo Mode: Showing sample data".to_string()
        } else if ctx.places_enabled {
            format!("Live Mode: Using {} AI with Google Places", ctx.provider)
        } else {
            format!(
                "Live Mode: Using {} AI (Google Places disabled)",
                ctx.provider
            )
        };

        let loading_message = self.loading.then(|| {
            if self.demo_mode {
                "Generating demo results...".to_string()
            } else {
                format!("{} is analyzing client needs...", ctx.provider)
            }
        });

        let error_hint = (self.error.is_some() && !self.demo_mode).then(|| {
            format!(
                "Make sure to add your actual {} API key to the configuration",
                ctx.provider
            )
        });

        SessionView {
            can_submit: self.can_submit(),
            session: self.clone(),
            status_message,
            loading_message,
            error_hint,
        }
    }
}
