use actix_web::{web, App, HttpServer};
use entanglion_backend::config::EngineConfig;
use entanglion_backend::infra::state::build_state;
use entanglion_backend::middleware::cors::cors_middleware;
use entanglion_backend::middleware::request_trace::RequestTrace;
use entanglion_backend::middleware::security_headers::SecurityHeaders;
use entanglion_backend::middleware::structured_logger::StructuredLogger;
use entanglion_backend::middleware::trace_span::TraceSpan;
use entanglion_backend::routes;
use entanglion_backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let engine = match EngineConfig::from_env() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Invalid engine configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_security(security)
        .with_engine(engine)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %host,
        port,
        max_turns = engine.max_turns,
        particle_count = engine.particle_count,
        win_policy = %engine.win_policy,
        "Starting Entanglion backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
