use crate::route::Route;
use rand::Rng;
use serde::Serialize;
use serde_json::{Value, json};

/// Lower bound of the simulated latency, inclusive.
pub const LATENCY_MIN_MS: u32 = 40;
/// Upper bound of the simulated latency, inclusive.
pub const LATENCY_MAX_MS: u32 = 260;
/// Status used when a route does not declare one.
pub const DEFAULT_STATUS_CODE: u16 = 200;

/// Synthetic result of one invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvocationOutcome {
    pub status_code: u16,
    pub latency_ms: u32,
    pub body: Value,
}

/// Body used when a route has no mock response.
pub fn default_body() -> Value {
    json!({ "message": "ok" })
}

/// Simulate a call against `route` using the thread-local RNG.
///
/// Does not look at `route.enabled`; callers reject disabled routes first.
pub fn simulate(route: &Route) -> InvocationOutcome {
    simulate_with(route, &mut rand::thread_rng())
}

/// Simulate a call with a caller-supplied random source.
pub fn simulate_with<R: Rng + ?Sized>(route: &Route, rng: &mut R) -> InvocationOutcome {
    InvocationOutcome {
        status_code: route.status_code.unwrap_or(DEFAULT_STATUS_CODE),
        latency_ms: rng.gen_range(LATENCY_MIN_MS..=LATENCY_MAX_MS),
        body: route
            .mock_response_json
            .clone()
            .unwrap_or_else(default_body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HttpMethod;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use uuid::Uuid;

    fn route(status_code: Option<u16>, body: Option<Value>) -> Route {
        Route {
            id: Uuid::new_v4(),
            api_id: Uuid::new_v4(),
            method: HttpMethod::Get,
            path: "/orders".into(),
            enabled: true,
            status_code,
            mock_response_json: body,
        }
    }

    #[test]
    fn missing_status_defaults_to_200() {
        let out = simulate(&route(None, None));
        assert_eq!(out.status_code, 200);
    }

    #[test]
    fn explicit_status_is_returned_verbatim() {
        for code in [201, 204, 404, 418, 503] {
            assert_eq!(simulate(&route(Some(code), None)).status_code, code);
        }
    }

    #[test]
    fn missing_body_defaults_to_ok_message() {
        assert_eq!(simulate(&route(None, None)).body, json!({ "message": "ok" }));
    }

    #[test]
    fn mock_body_is_returned_verbatim() {
        let body = json!({ "orders": [ { "id": 1 } ], "total": 1 });
        assert_eq!(simulate(&route(None, Some(body.clone()))).body, body);
    }

    #[test]
    fn latency_stays_in_closed_interval() {
        let r = route(None, None);
        for _ in 0..10_000 {
            let latency = simulate(&r).latency_ms;
            assert!(
                (LATENCY_MIN_MS..=LATENCY_MAX_MS).contains(&latency),
                "latency {latency} outside [40, 260]"
            );
        }
    }

    #[test]
    fn latency_reaches_both_bounds_eventually() {
        let r = route(None, None);
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<u32> = (0..50_000).map(|_| simulate_with(&r, &mut rng).latency_ms).collect();
        assert!(samples.contains(&LATENCY_MIN_MS));
        assert!(samples.contains(&LATENCY_MAX_MS));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let r = route(Some(201), None);
        let a = simulate_with(&r, &mut StdRng::seed_from_u64(42));
        let b = simulate_with(&r, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
