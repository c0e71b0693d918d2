// Matching layer: per-candidate scoring, batch ranking, and the screening
// endpoints. All inference goes through model_client — no direct endpoint
// calls here.

pub mod handlers;
pub mod ranking;
pub mod scoring;
