mod get_finance_report;
mod set_payment_status;

use actix_web::web;
use get_finance_report::get_finance_report_controller;
use set_payment_status::set_payment_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/finance/report",
        web::get().to(get_finance_report_controller),
    );
    cfg.route(
        "/finance/events/{event_id}/payment-status",
        web::post().to(set_payment_status_controller),
    );
}
