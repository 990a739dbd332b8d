use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use backend::auth::jwt::JwtService;
use backend::auth::middleware::AuthMiddleware;
use backend::clients::remedy::HttpRemedyGenerator;
use backend::clients::translate::Translator;
use backend::clients::tts::HttpSpeechSynthesizer;
use backend::clients::vision::HttpVisionClassifier;
use backend::clients::weather::HttpWeatherAdvisor;
use backend::clients::{
    RemedyGenerator, SpeechSynthesizer, VisionClassifier, WeatherAdvisor,
};
use backend::config::Config;
use backend::db::user_repository::{InMemoryUserRepository, UserRepository};
use backend::detection::orchestrator::DetectionOrchestrator;
use backend::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Configuration error: {}", e),
        )
    })?;

    let to_io_error =
        |e| std::io::Error::new(std::io::ErrorKind::Other, format!("HTTP client error: {}", e));

    let vision: Arc<dyn VisionClassifier> = Arc::new(
        HttpVisionClassifier::new(config.vision_api_url.clone(), config.stage_timeout)
            .map_err(to_io_error)?,
    );
    let remedy: Arc<dyn RemedyGenerator> = Arc::new(
        HttpRemedyGenerator::new(
            config.remedy_api_url.clone(),
            config.remedy_api_key.clone(),
            config.stage_timeout,
        )
        .map_err(to_io_error)?,
    );
    let weather: Arc<dyn WeatherAdvisor> = Arc::new(
        HttpWeatherAdvisor::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
            config.stage_timeout,
        )
        .map_err(to_io_error)?,
    );
    let tts: Arc<dyn SpeechSynthesizer> = Arc::new(
        HttpSpeechSynthesizer::new(config.tts_api_url.clone(), config.stage_timeout)
            .map_err(to_io_error)?,
    );
    let translator =
        Translator::new(config.translate_api_url.clone(), config.stage_timeout)
            .map_err(to_io_error)?;

    let orchestrator = DetectionOrchestrator::new(
        vision,
        remedy,
        weather.clone(),
        tts,
        config.default_location.clone(),
    );

    let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let jwt_service = JwtService::new(&config.jwt_secret);
    let auth_middleware = AuthMiddleware::new(jwt_service.clone());

    let orchestrator = web::Data::new(orchestrator);
    let translator = web::Data::new(translator);
    let jwt_service = web::Data::new(jwt_service);
    let weather_data: web::Data<dyn WeatherAdvisor> = web::Data::from(weather);
    let repo_data: web::Data<dyn UserRepository> = web::Data::from(user_repository);

    let static_dir = config.static_dir.clone();
    let bind_address = format!("0.0.0.0:{}", config.port);
    log::info!("Starting server on {}", bind_address);
    log::info!("Health check: http://localhost:{}/health", config.port);

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
            .app_data(orchestrator.clone())
            .app_data(translator.clone())
            .app_data(jwt_service.clone())
            .app_data(weather_data.clone())
            .app_data(repo_data.clone())
            .configure(|cfg| {
                configure_routes(cfg, static_dir.clone(), auth_middleware.clone())
            })
    })
    .bind(&bind_address)?
    .run()
    .await
}
