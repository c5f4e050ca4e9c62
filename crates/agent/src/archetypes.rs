//! The fixed Jungian archetype deck for the synchronicity draw.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeCard {
    pub name: &'static str,
    pub description: &'static str,
}

pub const ARCHETYPES: [ArchetypeCard; 8] = [
    ArchetypeCard {
        name: "The Shadow",
        description:
            "The repressed, unacknowledged aspects of the self. What are you hiding from?",
    },
    ArchetypeCard {
        name: "The Anima/Animus",
        description: "The contrasexual inner personality. The bridge to the unconscious.",
    },
    ArchetypeCard {
        name: "The Wise Old Man",
        description: "The guiding principle of wisdom, meaning, and spirit.",
    },
    ArchetypeCard {
        name: "The Great Mother",
        description: "The nurturing, fertile, but potentially devouring maternal instinct.",
    },
    ArchetypeCard {
        name: "The Puer Aeternus",
        description: "The eternal child. Resistance to boundaries and growing up.",
    },
    ArchetypeCard {
        name: "The Trickster",
        description: "The disruption of order. Pointing out the absurdity of the ego.",
    },
    ArchetypeCard {
        name: "The Persona",
        description: "The social mask. How much of your suffering is just maintaining the image?",
    },
    ArchetypeCard {
        name: "The Hero",
        description: "The ego's struggle to overcome the dragon of the unconscious.",
    },
];

/// Draw a uniformly random card from the deck.
pub fn draw_card() -> &'static ArchetypeCard {
    let idx = rand::thread_rng().gen_range(0..ARCHETYPES.len());
    &ARCHETYPES[idx]
}

/// Look a card up by its exact name.
pub fn find_card(name: &str) -> Option<&'static ArchetypeCard> {
    ARCHETYPES.iter().find(|card| card.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_has_eight_unique_cards() {
        assert_eq!(ARCHETYPES.len(), 8);
        for (i, a) in ARCHETYPES.iter().enumerate() {
            for b in &ARCHETYPES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_find_card_is_exact_match() {
        assert!(find_card("The Trickster").is_some());
        assert!(find_card("the trickster").is_none());
        assert!(find_card("The Fool").is_none());
    }

    #[test]
    fn test_draw_card_comes_from_deck() {
        for _ in 0..32 {
            let card = draw_card();
            assert!(find_card(card.name).is_some());
        }
    }
}
