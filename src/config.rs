// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        DemandRepository, GenerationStore, NotificationRepository, OrderRepository, PaymentRepository,
        PgGenerationStore, ProductRepository, ReturnsRepository, StaffRepository, VendorRepository,
    },
    services::{
        auth::AuthService, GenerationService, OrderService, PackingService, ReturnsService, VendorService,
    },
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub jwt_ttl_hours: i64,
    pub generation_concurrency: usize,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} inválida: '{}'", key, raw)),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Lê o `.env` (se existir) e as variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?,
            jwt_ttl_hours: parse_or(&lookup, "JWT_TTL_HOURS", 168)?,
            generation_concurrency: parse_or(&lookup, "GENERATION_CONCURRENCY", 4usize)?.max(1),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub vendor_repo: VendorRepository,
    pub product_repo: ProductRepository,
    pub payment_repo: PaymentRepository,
    pub notification_repo: NotificationRepository,
    pub vendor_service: VendorService,
    pub order_service: OrderService,
    pub returns_service: ReturnsService,
    pub generation_service: GenerationService,
    pub packing_service: PackingService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store = Arc::new(PgGenerationStore::new(db_pool.clone()));
        Ok(Self::with_store(db_pool, config, store))
    }

    /// Monta o grafo de dependências com um `GenerationStore` qualquer
    /// (Postgres em produção, memória nos testes).
    pub fn with_store(db_pool: PgPool, config: &AppConfig, store: Arc<dyn GenerationStore>) -> Self {
        let vendor_repo = VendorRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let demand_repo = DemandRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let returns_repo = ReturnsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            vendor_repo.clone(),
            staff_repo,
            config.jwt_secret.clone(),
            config.jwt_ttl_hours,
            db_pool.clone(),
        );
        let vendor_service = VendorService::new(
            db_pool.clone(),
            vendor_repo.clone(),
            demand_repo,
            product_repo.clone(),
            order_repo.clone(),
        );
        let order_service = OrderService::new(db_pool.clone(), order_repo.clone());
        let returns_service = ReturnsService::new(db_pool.clone(), returns_repo, order_repo);
        let generation_service = GenerationService::new(store.clone(), config.generation_concurrency);
        let packing_service = PackingService::new(store);

        Self {
            payment_repo: PaymentRepository::new(db_pool.clone()),
            notification_repo: NotificationRepository::new(db_pool.clone()),
            db_pool,
            auth_service,
            vendor_repo,
            product_repo,
            vendor_service,
            order_service,
            returns_service,
            generation_service,
            packing_service,
        }
    }
}
