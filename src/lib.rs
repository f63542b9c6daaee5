pub mod app;
pub mod simulator;

#[cfg(test)]
mod tests;
