use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::service_order::NewServiceOrder;
use crate::domain::types::ClientId;
use crate::dto::service_order::ServiceOrderModel;
use crate::forms::service_order::ServiceOrderForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, service_order};

#[get("/clientes/{id}/ordens-servico")]
pub async fn list_client_service_orders(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = ClientId::new(path.into_inner())
        .map_err(ServiceError::from)
        .and_then(|id| service_order::list_client_service_orders(repo.get_ref(), id));

    match result {
        Ok(orders) => HttpResponse::Ok().json(
            orders
                .into_iter()
                .map(ServiceOrderModel::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => error_response(&e),
    }
}

#[post("/ordens-servico")]
pub async fn open_service_order(
    form: web::Json<ServiceOrderForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order = match NewServiceOrder::try_from(form.into_inner()) {
        Ok(order) => order,
        Err(e) => return error_response(&e.into()),
    };

    match service_order::open_service_order(repo.get_ref(), &order) {
        Ok(created) => HttpResponse::Created().json(ServiceOrderModel::from(created)),
        Err(e) => error_response(&e),
    }
}
