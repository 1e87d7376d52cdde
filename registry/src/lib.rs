use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mailer::MailClient;
use adapter::redis::RedisClient;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::contact::ContactRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::outbox::OutboxRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use kernel::model::notification::RestaurantInfo;
use kernel::repository::auth::AuthRepository;
use kernel::repository::contact::ContactRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::outbox::OutboxRepository;
use kernel::repository::reservation::ReservationRepository;
use shared::config::{AppConfig, OutboxConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    contact_repository: Arc<dyn ContactRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    outbox_repository: Arc<dyn OutboxRepository>,
    mailer: Arc<MailClient>,
    restaurant: RestaurantInfo,
    outbox_config: OutboxConfig,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(
            pool.clone(),
            app_config.reservation.slot_capacity,
        ));
        let contact_repository = Arc::new(ContactRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let outbox_repository = Arc::new(OutboxRepositoryImpl::new(pool.clone()));
        let mailer = Arc::new(MailClient::new(&app_config.email));
        let restaurant = RestaurantInfo {
            name: app_config.email.restaurant_name.clone(),
            email: app_config.email.restaurant_email.clone(),
        };
        Self {
            health_check_repository,
            reservation_repository,
            contact_repository,
            auth_repository,
            outbox_repository,
            mailer,
            restaurant,
            outbox_config: app_config.outbox.clone(),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn contact_repository(&self) -> Arc<dyn ContactRepository> {
        self.contact_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn outbox_repository(&self) -> Arc<dyn OutboxRepository> {
        self.outbox_repository.clone()
    }

    pub fn mailer(&self) -> Arc<MailClient> {
        self.mailer.clone()
    }

    pub fn restaurant(&self) -> &RestaurantInfo {
        &self.restaurant
    }

    pub fn outbox_config(&self) -> &OutboxConfig {
        &self.outbox_config
    }
}
