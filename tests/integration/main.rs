mod onboarding_flow;
mod partial_updates;
mod remote_mirror;
mod store_roundtrip;
