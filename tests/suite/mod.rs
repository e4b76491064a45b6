mod calculators;
mod copilot;
mod journey;
mod persistence;
