//! Repair Desk API Server
//!
//! Back office for an equipment repair shop: companies, the equipment
//! catalog, units, repair intake, parts, analyses and user accounts.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, PostgresAccessoryRepository, PostgresAnalysisRepository,
    PostgresCompanyRepository, PostgresEntryEquipmentRepository, PostgresEquipCatalogRepository,
    PostgresEquipRepository, PostgresPartRepository, PostgresSessionRepository,
    PostgresTypeAccountRepository, PostgresUserRepository, ViaCepClient,
};
use app::{
    AccessoryService, AccountService, AnalysisService, CompanyService, EntryEquipmentService,
    EntryRepos, EquipCatalogService, EquipService, PartService, ProcessService,
};
use config::Config;
use domain::ports::{
    AccessoryRepository, AnalysisRepository, CompanyRepository, EntryEquipmentRepository,
    EquipCatalogRepository, EquipRepository, PartRepository, SessionRepository,
    TypeAccountRepository, UserRepository, ZipCodeLookup,
};

/// Every port the services depend on
#[derive(Clone)]
pub struct Repositories {
    pub companies: Arc<dyn CompanyRepository>,
    pub catalog: Arc<dyn EquipCatalogRepository>,
    pub equips: Arc<dyn EquipRepository>,
    pub entries: Arc<dyn EntryEquipmentRepository>,
    pub accessories: Arc<dyn AccessoryRepository>,
    pub parts: Arc<dyn PartRepository>,
    pub analyses: Arc<dyn AnalysisRepository>,
    pub type_accounts: Arc<dyn TypeAccountRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub zip_lookup: Arc<dyn ZipCodeLookup>,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub company_service: Arc<CompanyService<dyn CompanyRepository, dyn ZipCodeLookup>>,
    pub catalog_service: Arc<EquipCatalogService<dyn EquipCatalogRepository, dyn UserRepository>>,
    pub equip_service: Arc<
        EquipService<
            dyn EquipRepository,
            dyn CompanyRepository,
            dyn EquipCatalogRepository,
            dyn UserRepository,
        >,
    >,
    pub entry_service: Arc<
        EntryEquipmentService<
            dyn EntryEquipmentRepository,
            dyn EquipRepository,
            dyn CompanyRepository,
            dyn EquipCatalogRepository,
            dyn AccessoryRepository,
            dyn UserRepository,
        >,
    >,
    pub accessory_service: Arc<AccessoryService<dyn AccessoryRepository, dyn UserRepository>>,
    pub part_service:
        Arc<PartService<dyn PartRepository, dyn EquipCatalogRepository, dyn UserRepository>>,
    pub analysis_service: Arc<
        AnalysisService<
            dyn AnalysisRepository,
            dyn EntryEquipmentRepository,
            dyn PartRepository,
            dyn UserRepository,
        >,
    >,
    pub process_service: Arc<ProcessService<dyn EntryEquipmentRepository>>,
    pub account_service: Arc<
        AccountService<dyn TypeAccountRepository, dyn UserRepository, dyn SessionRepository>,
    >,
}

impl AppState {
    pub fn new(repos: Repositories, session_ttl_hours: i64) -> Self {
        Self {
            company_service: Arc::new(CompanyService::new(
                repos.companies.clone(),
                repos.zip_lookup.clone(),
            )),
            catalog_service: Arc::new(EquipCatalogService::new(
                repos.catalog.clone(),
                repos.users.clone(),
            )),
            equip_service: Arc::new(EquipService::new(
                repos.equips.clone(),
                repos.companies.clone(),
                repos.catalog.clone(),
                repos.users.clone(),
            )),
            entry_service: Arc::new(EntryEquipmentService::new(EntryRepos {
                entries: repos.entries.clone(),
                equips: repos.equips.clone(),
                companies: repos.companies.clone(),
                catalog: repos.catalog.clone(),
                accessories: repos.accessories.clone(),
                users: repos.users.clone(),
            })),
            accessory_service: Arc::new(AccessoryService::new(
                repos.accessories.clone(),
                repos.users.clone(),
            )),
            part_service: Arc::new(PartService::new(
                repos.parts.clone(),
                repos.catalog.clone(),
                repos.users.clone(),
            )),
            analysis_service: Arc::new(AnalysisService::new(
                repos.analyses.clone(),
                repos.entries.clone(),
                repos.parts.clone(),
                repos.users.clone(),
            )),
            process_service: Arc::new(ProcessService::new(repos.entries.clone())),
            account_service: Arc::new(AccountService::new(
                repos.type_accounts,
                repos.users,
                repos.sessions,
                session_ttl_hours,
            )),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes reachable without a session; `main` wraps them in a rate limiter
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
}

/// Build the full router around `login`, the (possibly rate-limited) login routes
pub fn build_router(state: AppState, login: Router<AppState>) -> Router {
    let protected = Router::new()
        // Companies
        .route(
            "/company",
            post(handlers::add_company).get(handlers::list_companies),
        )
        .route("/company/:cnpj", get(handlers::get_company))
        // Equipment catalog
        .route(
            "/equip/equipType",
            post(handlers::add_equip_type).get(handlers::list_equip_types),
        )
        .route(
            "/equip/equipType/mark",
            post(handlers::add_mark).get(handlers::list_marks_by_type),
        )
        .route(
            "/equip/equipType/model",
            post(handlers::add_model).get(handlers::list_models_by_mark),
        )
        // Equipment units
        .route("/equip", post(handlers::add_equip).get(handlers::list_equips))
        .route("/equip/:id", put(handlers::update_equip))
        .route(
            "/equip/serialNumber/:serial",
            get(handlers::get_equip_by_serial),
        )
        // Repair intake
        .route(
            "/entryEquipment",
            post(handlers::add_entry).get(handlers::list_entries),
        )
        .route(
            "/accessories",
            post(handlers::add_accessory).get(handlers::list_accessories),
        )
        // Parts
        .route("/part", post(handlers::add_part).get(handlers::list_parts))
        .route("/part/costPrice", put(handlers::update_cost_price))
        .route("/part/salePrice", put(handlers::update_sale_price))
        // Analysis and workflow
        .route("/analyze", post(handlers::add_analysis))
        .route("/analyze/:entry_id", get(handlers::get_analysis))
        .route("/process", get(handlers::list_process))
        .route("/process/:id", put(handlers::advance_process))
        // Accounts
        .route(
            "/typeAccount",
            post(handlers::add_type_account).get(handlers::list_type_accounts),
        )
        .route(
            "/typeAccount/:type_name",
            get(handlers::get_type_account_resources),
        )
        .route("/user", post(handlers::add_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(login)
        .merge(protected)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repair_desk_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Repair Desk API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&db)
        .await
        .context("Failed to create database schema")?;
    tracing::info!("Database connected");

    // Create adapters
    let repos = Repositories {
        companies: Arc::new(PostgresCompanyRepository::new(db.clone())),
        catalog: Arc::new(PostgresEquipCatalogRepository::new(db.clone())),
        equips: Arc::new(PostgresEquipRepository::new(db.clone())),
        entries: Arc::new(PostgresEntryEquipmentRepository::new(db.clone())),
        accessories: Arc::new(PostgresAccessoryRepository::new(db.clone())),
        parts: Arc::new(PostgresPartRepository::new(db.clone())),
        analyses: Arc::new(PostgresAnalysisRepository::new(db.clone())),
        type_accounts: Arc::new(PostgresTypeAccountRepository::new(db.clone())),
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        sessions: Arc::new(PostgresSessionRepository::new(db.clone())),
        zip_lookup: Arc::new(
            ViaCepClient::new(config.zip_lookup_url.clone(), config.zip_lookup_timeout)
                .context("Failed to build ZIP lookup client")?,
        ),
    };

    let state = AppState::new(repos, config.session_ttl_hours);

    if let Some((username, password)) = config.admin_credentials() {
        state
            .account_service
            .ensure_admin(username, password)
            .await
            .context("Failed to create bootstrap administrator")?;
    }

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    let login = login_routes().layer(GovernorLayer {
        config: governor_config,
    });

    let app = build_router(state, login);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
