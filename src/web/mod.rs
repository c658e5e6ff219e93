pub mod handlers;
pub mod schemas;

use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::utils::senate::SenateClient;
use handlers::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/senate")
            .route("/bill_types", web::get().to(handlers::get_bill_types))
            .route("/bills", web::get().to(handlers::get_bills))
            .route("/bill", web::get().to(handlers::get_bill)),
    );
}

pub async fn serve(host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        senate: SenateClient::default(),
    });

    info!("HTTP API listening on http://{}:{}", host, port);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((host, port))?
        .run()
        .await
}
