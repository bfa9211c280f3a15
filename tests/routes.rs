use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use osworks_crm::configure_routes;
use osworks_crm::credentials::{Argon2CredentialHasher, CredentialHasher, TemporaryPassword};
use osworks_crm::domain::types::{ClientEmail, ClientId};
use osworks_crm::mailer::{CredentialNotifier, NotifierError};
use osworks_crm::models::config::ApiSettings;
use osworks_crm::repository::{ClientReader, DieselRepository};

mod common;

/// Keeps every mailed password instead of sending it.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl CredentialNotifier for RecordingNotifier {
    fn send_new_password(
        &self,
        recipient: &ClientEmail,
        _name: &str,
        password: &TemporaryPassword,
    ) -> Result<(), NotifierError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), password.expose().to_string()));
        Ok(())
    }
}

fn fast_hasher() -> Argon2CredentialHasher {
    Argon2CredentialHasher::with_params(1024, 1, 1).unwrap()
}

fn client_json(name: &str, email: &str, cpf: &str) -> Value {
    json!({
        "nome": name,
        "email": email,
        "telefone": "34999990000",
        "cpf": cpf,
        "tipo": 1,
        "senha": "segredo1",
        "enderecos": [{
            "logradouro": "Rua A",
            "numero": "100",
            "bairro": "Centro",
            "cep": "38400-000",
            "cidadeId": 1
        }]
    })
}

macro_rules! init_app {
    ($repo:expr, $notifier:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(fast_hasher()))
                .app_data(web::Data::new(ApiSettings::default()))
                .app_data(web::Data::from($notifier.clone() as Arc<dyn CredentialNotifier>))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_client_lifecycle() {
    let test_db = common::TestDb::new("test_client_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = init_app!(repo, notifier);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Maria Silva", "maria@example.com", "529.982.247-25"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["cpf"], "52998224725");
    assert_eq!(created["enderecos"][0]["cidade"]["nome"], "Uberlândia");
    assert!(created.get("senha").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/clientes/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["email"], "maria@example.com");

    let req = test::TestRequest::get()
        .uri("/clientes/cpf/52998224725")
        .to_request();
    let by_cpf: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_cpf["id"], id);

    let req = test::TestRequest::get()
        .uri("/clientes/email/maria@example.com")
        .to_request();
    let by_email: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_email["id"], id);

    let mut update = client_json("Maria Souza", "maria@example.com", "52998224725");
    update["senha"] = "abc".into();
    let req = test::TestRequest::put()
        .uri(&format!("/clientes/{id}"))
        .set_json(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["nome"], "Maria Souza");

    let req = test::TestRequest::delete()
        .uri(&format!("/clientes/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/clientes/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert!(body["timestamp"].is_i64());
}

#[actix_web::test]
async fn test_invalid_and_duplicate_clients_are_rejected() {
    let test_db = common::TestDb::new("test_invalid_and_duplicate_clients_are_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = init_app!(repo, notifier);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Maria Silva", "maria@example.com", "52998224726"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Maria Silva", "maria@example.com", "52998224725"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Outra Maria", "maria@example.com", "11144477735"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_client_page() {
    let test_db = common::TestDb::new("test_client_page.db");
    let repo = DieselRepository::new(test_db.pool());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = init_app!(repo, notifier);

    for (name, email, cpf) in [
        ("Carla Dias", "carla@example.com", "52998224725"),
        ("Ana Souza", "ana@example.com", "11144477735"),
        ("Bruno Lima", "bruno@example.com", "12345678909"),
    ] {
        let req = test::TestRequest::post()
            .uri("/clientes")
            .set_json(client_json(name, email, cpf))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=0&linesPerPage=2&orderBy=nome&direction=ASC")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["content"][0]["nome"], "Ana Souza");
    assert_eq!(page["content"][1]["nome"], "Bruno Lima");
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);

    let req = test::TestRequest::get()
        .uri("/clientes/page?linesPerPage=1000")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["size"], 100);

    let req = test::TestRequest::get()
        .uri("/clientes/page?page=9223372036854775807")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["content"].as_array().map(Vec::len), Some(0));
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["last"], true);

    for uri in [
        "/clientes/page?orderBy=senha",
        "/clientes/page?direction=up",
        "/clientes/page?linesPerPage=0",
        "/clientes/page?page=-1",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST,
            "{uri}"
        );
    }

    let req = test::TestRequest::get().uri("/clientes").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().map(Vec::len), Some(3));
    assert_eq!(all[2]["nome"], "Carla Dias");
}

#[actix_web::test]
async fn test_client_with_orders_cannot_be_deleted() {
    let test_db = common::TestDb::new("test_client_with_orders_cannot_be_deleted.db");
    let repo = DieselRepository::new(test_db.pool());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = init_app!(repo, notifier);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Maria Silva", "maria@example.com", "52998224725"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/ordens-servico")
        .set_json(json!({ "clienteId": id, "descricao": "Troca de tela", "preco": 150.5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = test::read_body_json(resp).await;
    assert_eq!(order["status"], "open");
    assert_eq!(order["preco"], 150.5);

    let req = test::TestRequest::get()
        .uri(&format!("/clientes/{id}/ordens-servico"))
        .to_request();
    let orders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/clientes/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Há ordens de serviço vinculadas a esse cliente");

    let client_id = ClientId::new(id as i32).unwrap();
    assert!(repo.get_client_by_id(client_id).unwrap().is_some());

    let req = test::TestRequest::post()
        .uri("/ordens-servico")
        .set_json(json!({ "clienteId": 999, "descricao": "Troca de tela", "preco": 10 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_forgot_password_mails_a_working_password() {
    let test_db = common::TestDb::new("test_forgot_password_mails_a_working_password.db");
    let repo = DieselRepository::new(test_db.pool());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = init_app!(repo, notifier);

    let req = test::TestRequest::post()
        .uri("/clientes")
        .set_json(client_json("Maria Silva", "maria@example.com", "52998224725"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/auth/forgot")
        .set_json(json!({ "email": "maria@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let sent = notifier.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    let (recipient, password) = &sent[0];
    assert_eq!(recipient, "maria@example.com");

    let email = ClientEmail::new("maria@example.com").unwrap();
    let client = repo.get_client_by_email(&email).unwrap().unwrap();
    let hash = client.password_hash.unwrap();
    let hasher = fast_hasher();
    assert!(hasher.verify(password, &hash).unwrap());
    assert!(!hasher.verify("segredo1", &hash).unwrap());

    let req = test::TestRequest::post()
        .uri("/auth/forgot")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}
