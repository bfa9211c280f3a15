use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::credentials::Argon2CredentialHasher;
use crate::domain::client::UpdateClient;
use crate::domain::types::ClientId;
use crate::dto::client::ClientModel;
use crate::forms::client::{ClientForm, ClientPayload};
use crate::forms::page::PageQuery;
use crate::models::config::ApiSettings;
use crate::repository::DieselRepository;
use crate::routes::{error_response, internal_error};
use crate::services::page::PageRequest;
use crate::services::{ServiceError, client, page};

fn client_id(raw: i32) -> Result<ClientId, ServiceError> {
    ClientId::new(raw).map_err(ServiceError::from)
}

#[get("/clientes")]
pub async fn list_clients(repo: web::Data<DieselRepository>) -> impl Responder {
    match client::list_clients(repo.get_ref()) {
        Ok(clients) => HttpResponse::Ok().json(
            clients
                .into_iter()
                .map(ClientModel::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => error_response(&e),
    }
}

#[get("/clientes/page")]
pub async fn find_page(
    query: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
    settings: web::Data<ApiSettings>,
) -> impl Responder {
    let request = match PageRequest::try_from(query.into_inner()) {
        Ok(request) => request,
        Err(e) => return error_response(&e.into()),
    };

    match page::find_page(repo.get_ref(), &request, settings.max_page_size) {
        Ok(page) => HttpResponse::Ok().json(page.map(ClientModel::from)),
        Err(e) => error_response(&e),
    }
}

#[get("/clientes/{id}")]
pub async fn find_client(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = client_id(path.into_inner()).and_then(|id| client::get_client(repo.get_ref(), id));

    match result {
        Ok(client) => HttpResponse::Ok().json(ClientModel::from(client)),
        Err(e) => error_response(&e),
    }
}

#[get("/clientes/cpf/{cpf}")]
pub async fn find_client_by_tax_id(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client::get_client_by_tax_id(repo.get_ref(), &path) {
        Ok(client) => HttpResponse::Ok().json(ClientModel::from(client)),
        Err(e) => error_response(&e),
    }
}

#[get("/clientes/email/{email}")]
pub async fn find_client_by_email(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match client::get_client_by_email(repo.get_ref(), &path) {
        Ok(client) => HttpResponse::Ok().json(ClientModel::from(client)),
        Err(e) => error_response(&e),
    }
}

#[post("/clientes")]
pub async fn create_client(
    form: web::Json<ClientForm>,
    repo: web::Data<DieselRepository>,
    hasher: web::Data<Argon2CredentialHasher>,
) -> impl Responder {
    let payload = match ClientPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(&e.into()),
    };

    // Hashing the initial password is CPU bound.
    let result =
        web::block(move || client::register_client(repo.get_ref(), hasher.get_ref(), payload)).await;

    match result {
        Ok(Ok(created)) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/clientes/{}", created.id)))
            .json(ClientModel::from(created)),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            log::error!("Client registration task failed: {e}");
            internal_error()
        }
    }
}

#[put("/clientes/{id}")]
pub async fn update_client(
    path: web::Path<i32>,
    form: web::Json<ClientForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match client_id(path.into_inner()) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let updates = match UpdateClient::try_from(form.into_inner()) {
        Ok(updates) => updates,
        Err(e) => return error_response(&e.into()),
    };

    match client::update_client(repo.get_ref(), id, updates) {
        Ok(client) => HttpResponse::Ok().json(ClientModel::from(client)),
        Err(e) => error_response(&e),
    }
}

#[delete("/clientes/{id}")]
pub async fn delete_client(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = client_id(path.into_inner()).and_then(|id| client::delete_client(repo.get_ref(), id));

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}
