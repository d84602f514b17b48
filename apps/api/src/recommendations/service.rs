//! Recommendation pipeline — demo output, or a live advisor call optionally
//! paired with a concurrent places lookup.
//!
//! Flow (live + places): validate → `tokio::join!(advise, nearby)` → merge.
//! If exactly one branch fails, the other's output is returned and the failure
//! is kept verbatim in `warnings`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::demo::{generate_demo_response, simulate_latency, DEMO_FUNCTION};
use crate::errors::AppError;
use crate::intake::ClientIntake;
use crate::llm_client::prompts::SEARCH_TOOL_NAME;
use crate::llm_client::{ToolCall, EMPTY_RESPONSE_TEXT};
use crate::models::Resource;
use crate::places::{search_terms_for, PlaceSearch, PlacesError, FALLBACK_SEARCH_TERM};
use crate::render::format_section;
use crate::state::AppState;

/// `functions_used` tag for the concurrent places lookup.
pub const PLACES_FUNCTION: &str = "places_search";

/// At most this many model-requested searches run per submission.
const MAX_TOOL_SEARCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    Demo,
    Live,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub recommendations: String,
    pub functions_used: Vec<String>,
    pub source: OutputSource,
    pub warnings: Vec<String>,
}

/// One places search and what it found.
#[derive(Debug, Clone)]
struct NearbySection {
    term: String,
    location: String,
    resources: Vec<Resource>,
}

pub async fn find_resources(
    state: &AppState,
    intake: &ClientIntake,
    demo_mode: bool,
) -> Result<RecommendationOutcome, AppError> {
    intake.validate()?;

    if demo_mode {
        info!("Generating demo recommendations");
        simulate_latency(state.config.demo_delay_ms).await;
        return Ok(RecommendationOutcome {
            recommendations: generate_demo_response(&intake.needs, &intake.location),
            functions_used: vec![DEMO_FUNCTION.to_string()],
            source: OutputSource::Demo,
            warnings: Vec::new(),
        });
    }

    find_live(state, intake).await
}

async fn find_live(
    state: &AppState,
    intake: &ClientIntake,
) -> Result<RecommendationOutcome, AppError> {
    let advisor = state.advisor.as_ref();
    let message = intake.user_message();

    info!(
        provider = advisor.provider(),
        places = state.places.is_some(),
        "Requesting live recommendations"
    );

    let mut text_parts: Vec<String> = Vec::new();
    let mut functions_used: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let (advice, sections) = match &state.places {
        None => (Some(advisor.advise(&message).await?), None),
        Some(places) => {
            let (advice, nearby) = tokio::join!(
                advisor.advise(&message),
                search_nearby(places.as_ref(), &intake.needs, &intake.location)
            );

            match (advice, nearby) {
                (Err(llm_err), Err(places_err)) => {
                    warn!("Both live branches failed; places error: {places_err}");
                    return Err(AppError::Llm(llm_err));
                }
                (Ok(advice), Ok(sections)) => (Some(advice), Some(sections)),
                (Ok(advice), Err(places_err)) => {
                    warn!("Places lookup failed, showing advisor output only: {places_err}");
                    warnings.push(places_err.to_string());
                    (Some(advice), None)
                }
                (Err(llm_err), Ok(sections)) => {
                    warn!("Advisor call failed, showing places output only: {llm_err}");
                    warnings.push(llm_err.to_string());
                    (None, Some(sections))
                }
            }
        }
    };

    let requested = match &advice {
        Some(advice) => {
            run_tool_calls(
                state.places.as_deref(),
                &advice.tool_calls,
                &intake.location,
                &mut warnings,
            )
            .await
        }
        None => Vec::new(),
    };

    if let Some(advice) = &advice {
        // A reply made only of tool calls has no text worth showing.
        if advice.text != EMPTY_RESPONSE_TEXT || requested.is_empty() {
            text_parts.push(advice.text.clone());
        }
        functions_used.push(advisor.label().to_string());
    }

    if let Some(sections) = &sections {
        text_parts.push(render_nearby(&intake.location, sections));
        functions_used.push(PLACES_FUNCTION.to_string());
    }

    if !requested.is_empty() {
        text_parts.push(render_requested(&requested));
        functions_used.push(SEARCH_TOOL_NAME.to_string());
    }

    Ok(RecommendationOutcome {
        recommendations: text_parts.join("\n\n").trim_end().to_string(),
        functions_used,
        source: OutputSource::Live,
        warnings,
    })
}

/// Runs one search per matched category. The first failure fails the branch.
async fn search_nearby(
    places: &dyn PlaceSearch,
    needs: &str,
    location: &str,
) -> Result<Vec<NearbySection>, PlacesError> {
    let mut sections = Vec::new();
    for term in search_terms_for(needs) {
        let resources = places.search(term, location).await?;
        sections.push(NearbySection {
            term: term.to_string(),
            location: location.to_string(),
            resources,
        });
    }
    Ok(sections)
}

/// Executes `search_local_resources` calls requested by the model. Failed
/// searches become warnings.
async fn run_tool_calls(
    places: Option<&dyn PlaceSearch>,
    tool_calls: &[ToolCall],
    default_location: &str,
    warnings: &mut Vec<String>,
) -> Vec<NearbySection> {
    let requested: Vec<&ToolCall> = tool_calls
        .iter()
        .filter(|call| call.name == SEARCH_TOOL_NAME)
        .take(MAX_TOOL_SEARCHES)
        .collect();

    if requested.is_empty() {
        return Vec::new();
    }

    let Some(places) = places else {
        warnings.push(format!(
            "Model requested {SEARCH_TOOL_NAME} but places search is disabled"
        ));
        return Vec::new();
    };

    let mut sections = Vec::new();
    for call in requested {
        let term = call.arguments["query"]
            .as_str()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(FALLBACK_SEARCH_TERM);
        let location = call.arguments["location"]
            .as_str()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default_location);

        match places.search(term, location).await {
            Ok(resources) => sections.push(NearbySection {
                term: term.to_string(),
                location: location.to_string(),
                resources,
            }),
            Err(e) => {
                warn!("Requested search '{term}' failed: {e}");
                warnings.push(e.to_string());
            }
        }
    }
    sections
}

fn render_nearby(location: &str, sections: &[NearbySection]) -> String {
    let mut out = format!("🗺️ NEARBY RESOURCES ({location}):\n\n");
    for section in sections {
        push_section(&mut out, format!("🔎 {}", section.term.to_uppercase()), section);
    }
    out.trim_end().to_string()
}

/// Model-requested searches; each heading names the location searched.
fn render_requested(sections: &[NearbySection]) -> String {
    let mut out = String::from("🗺️ REQUESTED SEARCHES:\n\n");
    for section in sections {
        let heading = format!(
            "🔎 {} ({})",
            section.term.to_uppercase(),
            section.location
        );
        push_section(&mut out, heading, section);
    }
    out.trim_end().to_string()
}

fn push_section(out: &mut String, heading: String, section: &NearbySection) {
    if section.resources.is_empty() {
        out.push_str(&format!("{heading}:\n\n• No matching places found\n\n"));
    } else {
        out.push_str(&format_section(&heading, &section.resources));
    }
}
