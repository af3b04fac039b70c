// Scaling and prediction over pre-fit artifacts
pub mod ml;

// Application wiring and server lifecycle
pub mod system;
