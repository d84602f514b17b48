// Demo mode: keyword-matched canned output standing in for live API calls.

pub mod catalog;

use std::time::Duration;

use tracing::debug;

use crate::render::{format_bullets, format_section};

pub use catalog::matched_categories;

/// `functions_used` tag for demo output.
pub const DEMO_FUNCTION: &str = "demo_mode";

/// Builds the demo recommendations for the given needs and location.
pub fn generate_demo_response(needs: &str, location: &str) -> String {
    let mut response = format!("📍 RESOURCES FOR CLIENT IN {}\n\n", location.to_uppercase());

    let categories = matched_categories(needs);
    debug!(?categories, "Demo categories matched");

    for category in categories {
        response.push_str(&format_section(
            category.heading(),
            &category.demo_resources(),
        ));
    }

    response.push_str(&format_bullets(
        "⚠️ IMPORTANT REMINDERS",
        catalog::IMPORTANT_REMINDERS,
    ));
    response.push_str("\n\n");
    response.push_str(&format_bullets(
        "📞 24/7 CRISIS & EMERGENCY RESOURCES",
        catalog::CRISIS_LINES,
    ));

    response
}

/// Simulated latency before demo output is shown.
pub async fn simulate_latency(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_needs_include_food_section() {
        let out = generate_demo_response("Family needs FOOD pantry access", "Chicago, IL");
        assert!(out.starts_with("📍 RESOURCES FOR CLIENT IN CHICAGO, IL\n\n"));
        assert!(out.contains("🍽️ EMERGENCY FOOD ASSISTANCE:\n\n• Greater Chicago Food Depository\n"));
        assert!(out.contains("  ➤ NEXT STEPS: Walk-ins welcome. Fresh produce available.\n\n"));
    }

    #[test]
    fn test_unmatched_needs_only_have_fixed_blocks() {
        let out = generate_demo_response("utility bills", "60601");
        assert_eq!(
            out,
            "📍 RESOURCES FOR CLIENT IN 60601\n\n\
             ⚠️ IMPORTANT REMINDERS:\n\
             • Call ahead to verify current hours and availability\n\
             • Bring ID, proof of address, and income documentation when possible\n\
             • Many services available regardless of immigration status\n\
             • Ask about additional resources and referrals when you visit\n\
             • Some programs may have waiting lists - apply as soon as possible\n\n\
             📞 24/7 CRISIS & EMERGENCY RESOURCES:\n\
             • 211 Information & Referral: Dial 2-1-1\n\
             • National Suicide Prevention Lifeline: 988\n\
             • Crisis Text Line: Text HOME to 741741\n\
             • Chicago Police Non-Emergency: (311)\n\
             • Domestic Violence Hotline: 1-800-799-7233"
        );
    }

    #[test]
    fn test_sections_follow_catalog_order() {
        let out = generate_demo_response("needs therapy, a job and food", "Chicago");
        let food = out.find("EMERGENCY FOOD").unwrap();
        let jobs = out.find("EMPLOYMENT & JOB TRAINING").unwrap();
        let mental = out.find("MENTAL HEALTH SERVICES").unwrap();
        assert!(food < jobs && jobs < mental);
    }

    #[test]
    fn test_housing_keywords() {
        let out = generate_demo_response("facing eviction, behind on rent", "Chicago");
        assert!(out.contains("🏠 HOUSING & EMERGENCY SHELTER:"));
        assert!(out.contains("Pacific Garden Mission"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_latency_waits_configured_delay() {
        let start = tokio::time::Instant::now();
        simulate_latency(2000).await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
