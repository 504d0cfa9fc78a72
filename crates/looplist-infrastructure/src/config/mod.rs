pub mod latency;

pub use latency::{simulate_latency, LatencyConfig};
