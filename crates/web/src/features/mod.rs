pub mod calculator;
pub mod formulas;
pub mod score;
pub mod submissions;
