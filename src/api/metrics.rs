use actix_web::{web, HttpResponse};

use crate::services::{ProfileInitializer, StatsSnapshot};

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Event handling counters (Prometheus text format)", body = String)
    )
)]
pub async fn get_metrics(initializer: web::Data<ProfileInitializer>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(&initializer.stats()))
}

fn render(stats: &StatsSnapshot) -> String {
    format!(
        "# HELP profile_events_total Total number of user-created events received\n\
         # TYPE profile_events_total counter\n\
         profile_events_total {}\n\
         \n\
         # HELP profile_writes_total Total number of profile documents written\n\
         # TYPE profile_writes_total counter\n\
         profile_writes_total {}\n\
         \n\
         # HELP profile_events_malformed_total Events skipped for missing payload or uid\n\
         # TYPE profile_events_malformed_total counter\n\
         profile_events_malformed_total {}\n\
         \n\
         # HELP profile_write_failures_total Profile writes that failed and were dropped\n\
         # TYPE profile_write_failures_total counter\n\
         profile_write_failures_total {}\n",
        stats.events_total, stats.profiles_written, stats.malformed_events, stats.write_failures
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_counter() {
        let text = render(&StatsSnapshot {
            events_total: 7,
            profiles_written: 4,
            malformed_events: 2,
            write_failures: 1,
        });

        assert!(text.contains("profile_events_total 7\n"));
        assert!(text.contains("profile_writes_total 4\n"));
        assert!(text.contains("profile_events_malformed_total 2\n"));
        assert!(text.contains("profile_write_failures_total 1\n"));
    }
}
