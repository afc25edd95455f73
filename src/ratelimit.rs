use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use std::time::Duration;

// Fixed spacing between page fetches. fbref rate-limits aggressive
// clients, so stay at one request per second.
const DELAY_BETWEEN_REQ: Duration = Duration::from_secs(1);

type SpecificGovernorRateLimiter =
    GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

pub struct RateLimiter {
    between_req: SpecificGovernorRateLimiter,
}

impl RateLimiter {
    pub fn new() -> Self {
        // No two requests closer together than the fixed delay.
        let between_req = GovernorRateLimiter::direct(Quota::with_period(DELAY_BETWEEN_REQ).unwrap());

        RateLimiter { between_req }
    }

    pub async fn wait_until_ready(&self) {
        self.between_req.until_ready().await;
    }
}
