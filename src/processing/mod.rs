//! Skill extraction, similarity and ranking

pub mod experience;
pub mod match_scorer;
pub mod nlp;
pub mod ranking;
pub mod similarity;
pub mod skill_extractor;
pub mod taxonomy;
pub mod text_processor;
