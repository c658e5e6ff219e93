use actix_web::{web, HttpResponse, Responder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::schemas::{Bill, BillCodeQuery, BillText, BillType, BillsQuery};
use crate::utils::senate::{BillSearch, SenateClient};

pub struct AppState {
    pub senate: SenateClient,
}

// Records the upstream hands back in an unexpected shape are dropped rather
// than failing the whole response.
fn reshape<T: DeserializeOwned>(records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect()
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(
        "<h1>Senate Open Data API</h1>\n\
         <p>Endpoints: <code>/senate/bill_types</code>, <code>/senate/bills</code>, \
         <code>/senate/bill?code=...</code></p>",
    )
}

pub async fn get_bill_types(state: web::Data<AppState>) -> HttpResponse {
    let records = state.senate.fetch_bill_types().await;
    HttpResponse::Ok().json(reshape::<BillType>(records))
}

pub async fn get_bills(state: web::Data<AppState>, query: web::Query<BillsQuery>) -> HttpResponse {
    let query = query.into_inner();
    let search = BillSearch {
        year: query.year,
        bill_type: query.bill_type,
        number: query.number,
        author: query.author,
        keyword: query.keyword,
    };
    let records = state.senate.fetch_bills(&search).await;
    HttpResponse::Ok().json(reshape::<Bill>(records))
}

pub async fn get_bill(state: web::Data<AppState>, query: web::Query<BillCodeQuery>) -> HttpResponse {
    let records = state.senate.fetch_bill_texts(&query.code).await;
    HttpResponse::Ok().json(reshape::<BillText>(records))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::AppState;
    use crate::utils::senate::SenateClient;
    use crate::web::configure;

    fn app_state(upstream: &MockServer) -> web::Data<AppState> {
        web::Data::new(AppState {
            senate: SenateClient::new(upstream.uri()),
        })
    }

    #[actix_web::test]
    async fn bill_types_endpoint_reshapes_the_envelope() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/materia/subtipos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ListaSiglas": {
                    "SiglasAtivas": {
                        "Siglas": [{"Sigla": "PLS", "Descricao": "Projeto de Lei do Senado"}]
                    }
                }
            })))
            .mount(&upstream)
            .await;

        let app =
            test::init_service(App::new().app_data(app_state(&upstream)).configure(configure))
                .await;
        let request = test::TestRequest::get().uri("/senate/bill_types").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            body,
            json!([{"bill_type": "PLS", "description": "Projeto de Lei do Senado"}])
        );
    }

    #[actix_web::test]
    async fn bills_endpoint_forwards_filters() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/materia/pesquisa/lista"))
            .and(query_param("ano", "2023"))
            .and(query_param("numero", "99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "PesquisaBasicaMateria": {
                    "Materias": {
                        "Materia": [{
                            "Codigo": "555",
                            "Sigla": "PLS",
                            "Numero": "99",
                            "Ano": "2023",
                            "Ementa": "Dispõe sobre educação"
                        }]
                    }
                }
            })))
            .mount(&upstream)
            .await;

        let app =
            test::init_service(App::new().app_data(app_state(&upstream)).configure(configure))
                .await;
        let request = test::TestRequest::get()
            .uri("/senate/bills?year=2023&number=99")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body[0]["code"], "555");
        assert_eq!(body[0]["syllabus"], "Dispõe sobre educação");
        assert_eq!(body[0]["author"], "");
    }

    #[actix_web::test]
    async fn bill_endpoint_appends_inline_disposition() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/materia/textos/555"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TextoMateria": {
                    "Materia": {
                        "Textos": {
                            "Texto": {
                                "CodigoTexto": "7",
                                "UrlTexto": "https://legis.senado.leg.br/doc?dm=1"
                            }
                        }
                    }
                }
            })))
            .mount(&upstream)
            .await;

        let app =
            test::init_service(App::new().app_data(app_state(&upstream)).configure(configure))
                .await;
        let request = test::TestRequest::get()
            .uri("/senate/bill?code=555")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            body,
            json!([{
                "code": "7",
                "document_type": "",
                "text_format": "",
                "text_type": "",
                "text_description": "",
                "text_author": "",
                "text_date": "",
                "text_url": "https://legis.senado.leg.br/doc?dm=1&disposition=inline"
            }])
        );
    }

    #[actix_web::test]
    async fn upstream_failure_serializes_as_empty_list() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/materia/subtipos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&upstream)
            .await;

        let app =
            test::init_service(App::new().app_data(app_state(&upstream)).configure(configure))
                .await;
        let request = test::TestRequest::get().uri("/senate/bill_types").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body, json!([]));
    }
}
