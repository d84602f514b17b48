/// Location filled in alongside any example query.
pub const EXAMPLE_LOCATION: &str = "Chicago, IL 60601";

pub const EXAMPLE_QUERIES: &[&str] = &[
    "Single mother with 2 kids needs emergency food assistance and childcare help",
    "Elderly client needs help with utility bills and transportation to medical appointments",
    "Homeless veteran needs temporary housing and job training programs",
    "Family facing eviction needs rental assistance and food pantry access",
    "Teenager aging out of foster care needs housing and employment services",
    "Client struggling with mental health needs counseling and medical care",
    "Immigrant family needs ESL classes and healthcare services",
];

pub fn example(index: usize) -> Option<&'static str> {
    EXAMPLE_QUERIES.get(index).copied()
}
