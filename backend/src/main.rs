mod analysis;
mod cache;
mod config;
mod db;
mod fingerprint;
mod model;
mod routes;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;

use analysis::service::AnalysisService;
use cache::cache_service::CacheService;
use config::Config;
use db::dynamodb_repository::DynamoDbRepository;
use model::groq::GroqClient;
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Initialize AWS configuration and the document-store client
    let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let dynamodb_client = DynamoDbClient::new(&aws_config);

    let db_repo = DynamoDbRepository::new(dynamodb_client, config.analyses_table.clone());
    let cache_service = CacheService::new(Arc::new(db_repo));
    let groq_client = GroqClient::new(config.groq_api_key.clone());

    let analysis_service = AnalysisService::new(
        cache_service,
        Arc::new(groq_client),
        config.models.clone(),
    );

    let bind_address = format!("0.0.0.0:{}", config.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(analysis_service.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
