pub mod achievements;
