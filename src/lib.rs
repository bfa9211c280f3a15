//! OSWorks CRM: clients, their addresses and service orders over a JSON API.
//!
//! The `data` feature builds only the persistence layer (`domain`, `models`,
//! `schema`, `db`, `repository`); `server` adds the HTTP application.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, http::header, middleware, web};

#[cfg(feature = "server")]
use crate::credentials::Argon2CredentialHasher;
#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::mailer::{CredentialNotifier, DisabledNotifier, SmtpNotifier};
#[cfg(feature = "server")]
use crate::models::config::{ApiSettings, ServerConfig};
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod credentials;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod mailer;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Registers every API endpoint. `/clientes/page` precedes `/clientes/{id}`.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use crate::routes::{auth, client, service_order};

    cfg.app_data(routes::json_config())
        .app_data(routes::query_config())
        .service(client::list_clients)
        .service(client::find_page)
        .service(client::find_client_by_tax_id)
        .service(client::find_client_by_email)
        .service(service_order::list_client_service_orders)
        .service(client::find_client)
        .service(client::create_client)
        .service(client::update_client)
        .service(client::delete_client)
        .service(service_order::open_service_order)
        .service(auth::forgot_password);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let hasher = Argon2CredentialHasher::default();
    let settings = ApiSettings::from(&server_config);

    let notifier: Arc<dyn CredentialNotifier> = match &server_config.mailer {
        Some(mailer_config) => Arc::new(SmtpNotifier::new(mailer_config).map_err(|e| {
            std::io::Error::other(format!("Failed to configure mailer: {e}"))
        })?),
        None => {
            log::warn!("No mailer configured, new passwords will not be delivered");
            Arc::new(DisabledNotifier)
        }
    };
    let notifier = web::Data::from(notifier);

    let cors_origin = server_config.cors_origin.clone();
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .expose_headers(vec![header::LOCATION])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(hasher.clone()))
            .app_data(web::Data::new(settings))
            .app_data(notifier.clone())
            .configure(configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
