pub mod grid;
pub mod title_card;
