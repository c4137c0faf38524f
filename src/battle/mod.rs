pub mod ability_effects;
pub mod ai;
pub mod calculators;
pub mod catch;
pub mod conditions;
pub mod engine;
pub mod state;

#[cfg(test)]
mod tests;
