//! Hard-coded fallback documents for the public-rendering surface.
//!
//! Each constant matches the shape of the live document for its domain so
//! a failed fetch never leaves a page section empty. Kept in sync with the
//! domain schema descriptors; a test validates each default against its
//! rules.

use serde_json::{json, Value};

use crate::models::ContentDomain;

/// The default document rendered when a domain's fetch fails or the
/// domain has never been saved.
pub fn default_document(domain: ContentDomain) -> Value {
    match domain {
        ContentDomain::Home => json!({
            "hero": {
                "title": "Your Journey to Global Education Starts Here",
                "subtitle": "Expert counseling for study abroad, test prep, and university admissions.",
                "ctaText": "Book a Free Consultation",
                "image": "/uploads/hero-default.jpg"
            },
            "stats": [
                { "label": "Students Placed", "value": "2000+" },
                { "label": "Partner Universities", "value": "150+" },
                { "label": "Countries", "value": "12" }
            ],
            "servicesIntro": {
                "title": "How We Help",
                "description": "From choosing a destination to landing a visa, our counselors guide every step."
            },
            "testimonialsTitle": "What Our Students Say"
        }),
        ContentDomain::About => json!({
            "hero": { "title": "About Us" },
            "mission": "To make world-class education accessible to every ambitious student.",
            "vision": "A world where geography never limits opportunity.",
            "values": [
                { "title": "Integrity", "description": "Honest advice, always." },
                { "title": "Care", "description": "Every student gets a personal plan." },
                { "title": "Expertise", "description": "Counselors who have done it themselves." },
                { "title": "Results", "description": "We measure ourselves by admissions." }
            ],
            "story": "Founded by former international students, we have guided thousands of applicants since our first office opened."
        }),
        ContentDomain::ContactInfo => json!({
            "address": "Suite 4, Education House, 12 College Road",
            "phone": "+1-555-0100",
            "email": "hello@educonsult.example",
            "officeHours": "Mon-Fri 9:00-18:00",
            "mapUrl": "https://maps.example.com/educonsult",
            "socials": {
                "facebook": "https://facebook.com/educonsult",
                "instagram": "https://instagram.com/educonsult",
                "linkedin": "https://linkedin.com/company/educonsult"
            }
        }),
        ContentDomain::StudyAbroad => json!({
            "hero": { "title": "Study Abroad Programs" },
            "intro": "Choose from destinations across four continents with full application support.",
            "destinations": [
                { "country": "United Kingdom", "highlights": "One-year master's programs" },
                { "country": "Canada", "highlights": "Post-study work permits" },
                { "country": "Australia", "highlights": "Strong STEM universities" }
            ],
            "processSteps": [
                { "step": 1, "title": "Profile Review", "description": "We assess your goals and academics." },
                { "step": 2, "title": "Shortlist", "description": "A tailored list of universities." },
                { "step": 3, "title": "Apply", "description": "Essays, documents, and submissions." },
                { "step": 4, "title": "Visa", "description": "Interview prep and paperwork." }
            ]
        }),
        ContentDomain::TestPrep => json!({
            "hero": { "title": "Test Preparation" },
            "intro": "Structured courses with practice tests and one-on-one review.",
            "courses": [
                { "name": "IELTS", "duration": "6 weeks" },
                { "name": "TOEFL", "duration": "6 weeks" },
                { "name": "GRE", "duration": "8 weeks" },
                { "name": "SAT", "duration": "10 weeks" }
            ],
            "faqs": [
                { "question": "Are classes online or in person?", "answer": "Both options are available." },
                { "question": "Do you offer mock tests?", "answer": "Weekly, with scored feedback." }
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_passes_its_domain_rules() {
        for domain in ContentDomain::all() {
            let doc = default_document(*domain);
            assert!(
                domain.rules().validate(&doc).is_ok(),
                "default for '{}' fails validation",
                domain.as_str()
            );
        }
    }
}
