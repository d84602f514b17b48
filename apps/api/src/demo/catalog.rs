//! Static service catalog: category headings, trigger keywords, places search
//! terms, and the Chicago organizations shown in demo mode.

use serde::Serialize;

use crate::models::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Food,
    Employment,
    Housing,
    Childcare,
    Healthcare,
    MentalHealth,
}

/// Catalog order; demo sections and places searches follow it.
pub const ALL_CATEGORIES: [ServiceCategory; 6] = [
    ServiceCategory::Food,
    ServiceCategory::Employment,
    ServiceCategory::Housing,
    ServiceCategory::Childcare,
    ServiceCategory::Healthcare,
    ServiceCategory::MentalHealth,
];

impl ServiceCategory {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Food => "🍽️ EMERGENCY FOOD ASSISTANCE",
            Self::Employment => "💼 EMPLOYMENT & JOB TRAINING",
            Self::Housing => "🏠 HOUSING & EMERGENCY SHELTER",
            Self::Childcare => "👶 CHILDCARE & FAMILY SERVICES",
            Self::Healthcare => "🏥 HEALTHCARE SERVICES",
            Self::MentalHealth => "🧠 MENTAL HEALTH SERVICES",
        }
    }

    /// Lowercase substrings that select this category from free-text needs.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Food => &["food", "hungry", "eat"],
            Self::Employment => &["job", "work", "employ"],
            Self::Housing => &["housing", "homeless", "shelter", "rent"],
            Self::Childcare => &["child", "daycare", "care"],
            Self::Healthcare => &["health", "medical", "doctor"],
            Self::MentalHealth => &["mental", "counsel", "therapy"],
        }
    }

    pub fn search_term(&self) -> &'static str {
        match self {
            Self::Food => "food bank",
            Self::Employment => "job training center",
            Self::Housing => "homeless shelter",
            Self::Childcare => "childcare assistance",
            Self::Healthcare => "community health clinic",
            Self::MentalHealth => "mental health counseling",
        }
    }

    pub fn matches(&self, needs_lower: &str) -> bool {
        self.keywords().iter().any(|kw| needs_lower.contains(kw))
    }

    pub fn demo_resources(&self) -> Vec<Resource> {
        match self {
            Self::Food => vec![
                Resource::listed(
                    "Greater Chicago Food Depository",
                    "4100 W Ann Lurie Pl, Chicago, IL 60632",
                    "(773) 247-3663",
                    "Mon-Fri 9AM-4PM, Sat 8AM-2PM",
                    "Call today for emergency food box. No appointment needed. Bring ID.",
                ),
                Resource::listed(
                    "St. Augustine Food Pantry",
                    "1210 W Carmen Ave, Chicago, IL 60640",
                    "(773) 728-1210",
                    "Tuesdays & Thursdays 10AM-2PM",
                    "Bring ID and proof of address. Serves North Side families.",
                ),
                Resource::listed(
                    "Holy Trinity Food Pantry",
                    "1120 N Noble St, Chicago, IL 60642",
                    "(773) 278-1090",
                    "Wednesdays 4PM-6PM",
                    "Walk-ins welcome. Fresh produce available.",
                ),
            ],
            Self::Employment => vec![
                Resource::listed(
                    "Chicago Cook Workforce Partnership",
                    "69 W Washington St, Chicago, IL 60602",
                    "(312) 603-0200",
                    "Mon-Fri 8:30AM-5PM",
                    "Free job training programs. Call to schedule intake appointment.",
                ),
                Resource::listed(
                    "Goodwill Industries Career Center",
                    "4650 S Cottage Grove Ave, Chicago, IL 60653",
                    "(773) 247-6000",
                    "Mon-Fri 9AM-5PM",
                    "Resume help, job search assistance. Drop-in hours available.",
                ),
            ],
            Self::Housing => vec![
                Resource::listed(
                    "Chicago Department of Family Services",
                    "1615 W Chicago Ave, Chicago, IL 60622",
                    "(312) 743-0300",
                    "Mon-Fri 8AM-5PM",
                    "Emergency rental assistance. Bring lease, ID, and income docs.",
                ),
                Resource::listed(
                    "Pacific Garden Mission",
                    "1458 S Canal St, Chicago, IL 60607",
                    "(312) 922-1462",
                    "24/7 intake",
                    "Emergency shelter available. Men's and women's programs.",
                ),
            ],
            Self::Childcare => vec![
                Resource::listed(
                    "Illinois Action for Children",
                    "4753 N Broadway, Chicago, IL 60640",
                    "(312) 823-1100",
                    "Mon-Fri 9AM-5PM",
                    "Childcare subsidies available. Apply online or call for help.",
                ),
                Resource::listed(
                    "Chicago Commons - Head Start",
                    "915 N Wolcott Ave, Chicago, IL 60622",
                    "(773) 342-5330",
                    "Mon-Fri 7:30AM-6PM",
                    "Free preschool for income-eligible families. Call for enrollment.",
                ),
            ],
            Self::Healthcare => vec![Resource::listed(
                "Erie Family Health Centers",
                "1701 W Superior St, Chicago, IL 60622",
                "(312) 666-3494",
                "Mon-Fri 8AM-8PM, Sat 8AM-4PM",
                "Sliding fee scale. Accept Medicaid. Call for appointment.",
            )],
            Self::MentalHealth => vec![Resource::listed(
                "Thresholds Psychiatric Rehabilitation",
                "4101 N Ravenswood Ave, Chicago, IL 60613",
                "(773) 572-5500",
                "Mon-Fri 9AM-5PM",
                "Free counseling services. Walk-in crisis services available.",
            )],
        }
    }
}

/// Categories whose keywords appear in `needs`, in catalog order.
pub fn matched_categories(needs: &str) -> Vec<ServiceCategory> {
    let needs_lower = needs.to_lowercase();
    ALL_CATEGORIES
        .iter()
        .copied()
        .filter(|c| c.matches(&needs_lower))
        .collect()
}

pub const IMPORTANT_REMINDERS: &[&str] = &[
    "Call ahead to verify current hours and availability",
    "Bring ID, proof of address, and income documentation when possible",
    "Many services available regardless of immigration status",
    "Ask about additional resources and referrals when you visit",
    "Some programs may have waiting lists - apply as soon as possible",
];

pub const CRISIS_LINES: &[&str] = &[
    "211 Information & Referral: Dial 2-1-1",
    "National Suicide Prevention Lifeline: 988",
    "Crisis Text Line: Text HOME to 741741",
    "Chicago Police Non-Emergency: (311)",
    "Domestic Violence Hotline: 1-800-799-7233",
];
