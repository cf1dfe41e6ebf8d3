pub mod grid;
pub mod plan;
pub mod title_card;
