use std::sync::Arc;

use healthfit_client::{completion, identity, CompletionProvider, IdentityProvider};
use healthfit_db::{
    chat::{ChatRepository, ChatRepositoryImpl},
    connection::Connection,
    food::{FoodRepository, FoodRepositoryImpl},
    meal::{MealRepository, MealRepositoryImpl},
    metric::{MetricRepository, MetricRepositoryImpl},
    user::{UserRepository, UserRepositoryImpl},
    workout::{WorkoutRepository, WorkoutRepositoryImpl},
};
use log::warn;

use crate::config::Config;

/// Everything a handler can reach, shared across workers.
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub foods: Arc<dyn FoodRepository>,
    pub meals: Arc<dyn MealRepository>,
    pub metrics: Arc<dyn MetricRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub coach: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(connection: Connection, config: &Config) -> Self {
        let coach: Arc<dyn CompletionProvider> = match &config.groq_api_key {
            Some(api_key) => Arc::new(completion::create(
                config.groq_base_url.clone(),
                api_key.clone(),
                config.groq_model.clone(),
            )),
            None => {
                warn!("GROQ_API_KEY not set, coach will answer in offline mode");
                Arc::new(completion::OfflineCompletionProvider)
            }
        };

        Self {
            users: Arc::new(UserRepositoryImpl::new(connection.clone())),
            foods: Arc::new(FoodRepositoryImpl::new(connection.clone())),
            meals: Arc::new(MealRepositoryImpl::new(connection.clone())),
            metrics: Arc::new(MetricRepositoryImpl::new(connection.clone())),
            workouts: Arc::new(WorkoutRepositoryImpl::new(connection.clone())),
            chats: Arc::new(ChatRepositoryImpl::new(connection)),
            identity: Arc::new(identity::create(
                config.supabase_url.clone(),
                config.supabase_anon_key.clone(),
            )),
            coach,
        }
    }
}
