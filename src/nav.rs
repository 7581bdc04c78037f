//! Navigation collaborator.
//!
//! The runner's host hands the scenario's `next_route` here on completion;
//! route identifiers are opaque strings fixed at scenario-definition time,
//! never constructed by the runner.

pub trait Navigator {
    fn navigate_to(&mut self, route: &str);
}

/// Default navigator: records the route and logs it. The terminal build has
/// nowhere to navigate, but the hand-off point stays observable.
#[derive(Debug, Default)]
pub struct RouteLog {
    routes: Vec<String>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn last(&self) -> Option<&str> {
        self.routes.last().map(String::as_str)
    }
}

impl Navigator for RouteLog {
    fn navigate_to(&mut self, route: &str) {
        log::info!("navigating to route '{}'", route);
        self.routes.push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_log_records_in_order() {
        let mut nav = RouteLog::new();
        nav.navigate_to("phase-2");
        nav.navigate_to("phase-3");
        assert_eq!(nav.routes(), ["phase-2", "phase-3"]);
        assert_eq!(nav.last(), Some("phase-3"));
    }
}
