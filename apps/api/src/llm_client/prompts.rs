use serde_json::{json, Value};

/// System prompt shared by every provider.
pub const RESOURCE_ASSISTANT_SYSTEM: &str = "\
You are an expert social services resource assistant helping social workers find resources for their clients.

When given client needs and location, provide specific recommendations including:
- Types of services needed (food assistance, housing, employment, healthcare, etc.)
- General guidance on what resources to look for
- Next steps and documentation typically needed
- Local resource types commonly available
- Eligibility considerations

Be specific and actionable in your recommendations. Format your response clearly with service categories and next steps.";

/// Name of the places lookup the model may request.
pub const SEARCH_TOOL_NAME: &str = "search_local_resources";

/// Function declaration in chat-completions `tools` format.
pub fn search_tool_schema() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": SEARCH_TOOL_NAME,
            "description": "Search for local social-service organizations (food banks, shelters, \
                clinics, job-training centers) near the client's location.",
            "parameters": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Kind of service to look for, e.g. 'food bank'"
                    },
                    "location": {
                        "type": "string",
                        "description": "ZIP code or 'City, State' to search around"
                    }
                },
                "required": ["query", "location"]
            }
        }
    })
}
