mod create_recurrence;
mod delete_occurrence;
mod delete_recurrence;
mod update_recurrence;

use actix_web::web;
use create_recurrence::create_recurrence_controller;
use delete_occurrence::delete_occurrence_controller;
use delete_recurrence::delete_recurrence_controller;
use update_recurrence::update_recurrence_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/recurrences", web::post().to(create_recurrence_controller));
    cfg.route(
        "/recurrences/{series_id}",
        web::put().to(update_recurrence_controller),
    );
    cfg.route(
        "/recurrences/{series_id}",
        web::delete().to(delete_recurrence_controller),
    );
    cfg.route(
        "/recurrences/{series_id}/occurrences/{event_id}",
        web::delete().to(delete_occurrence_controller),
    );
}
