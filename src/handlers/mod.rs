pub mod bids;
pub mod gigs;
pub mod notifications;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Gig routes (listing and detail are public, creation requires auth) ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/{id}", web::get().to(gigs::get_gig)),
    );

    // ── Bid routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/bids")
            .route("", web::post().to(bids::place_bid))
            .route("/{gig_id}", web::get().to(bids::get_bids_by_gig))
            .route("/{bid_id}/hire", web::patch().to(bids::hire)),
    );

    // ── Real-time notification socket (token passed as query param) ──
    cfg.service(
        web::resource("/notifications/ws").route(web::get().to(notifications::ws_connect)),
    );
}
