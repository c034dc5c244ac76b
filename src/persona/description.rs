// src/persona/description.rs
//! Narrative paragraph describing the younger self, one sentence pair per trait.

use crate::profile::{Band, PersonalityProfile, Trait};

struct Wording {
    high: &'static str,
    middle: &'static str,
    low: &'static str,
}

fn wording(field: Trait) -> Wording {
    match field {
        Trait::Openness => Wording {
            high: "You were curious and open to new experiences. You had a vivid imagination and enjoyed exploring new ideas. ",
            middle: "You had a balance between curiosity and practicality. You appreciated both new ideas and established traditions. ",
            low: "You preferred routine and familiar experiences. You were practical and focused on concrete facts rather than abstract concepts. ",
        },
        Trait::Conscientiousness => Wording {
            high: "You were organized and detail-oriented. You liked to plan ahead and follow through with your commitments. ",
            middle: "You had a moderate approach to organization and planning. You could be structured when needed but also adaptable to change. ",
            low: "You were spontaneous and flexible. You preferred to go with the flow rather than stick to rigid plans. ",
        },
        Trait::Extraversion => Wording {
            high: "You were outgoing and energetic. You enjoyed being around people and were often the life of the party. ",
            middle: "You had a balance between social energy and personal reflection. You enjoyed both group activities and quiet time alone. ",
            low: "You were more reserved and enjoyed spending time alone or with close friends. You preferred deeper one-on-one conversations. ",
        },
        Trait::Agreeableness => Wording {
            high: "You were compassionate and cared deeply about others. You tried to avoid conflict and maintain harmony. ",
            middle: "You had a balanced approach to social interactions. You could be cooperative but also assertive when needed. ",
            low: "You were direct and straightforward. You weren't afraid to challenge others or stand your ground. ",
        },
        Trait::Neuroticism => Wording {
            high: "You experienced emotions intensely and were sensitive to stress. You worried about the future and were cautious in your decisions. ",
            middle: "You had a moderate emotional sensitivity. You could feel things deeply but also maintain perspective and balance. ",
            low: "You were emotionally stable and resilient. You stayed calm under pressure and didn't worry too much about things. ",
        },
    }
}

/// Concatenate one fragment per trait in canonical order.
pub fn describe(profile: &PersonalityProfile) -> String {
    Trait::ALL
        .iter()
        .map(|field| {
            let text = wording(*field);
            match profile.score(*field).band() {
                Band::High => text.high,
                Band::Middle => text.middle,
                Band::Low => text.low,
            }
        })
        .collect()
}
