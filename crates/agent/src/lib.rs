pub mod archetypes;
pub mod context;
pub mod personas;
pub mod turn;

pub use archetypes::{draw_card, find_card, ArchetypeCard, ARCHETYPES};
pub use context::assemble_instruction;
pub use personas::Persona;
pub use turn::{run_chat_turn, TurnOutcome, FALLBACK_REPLY};
