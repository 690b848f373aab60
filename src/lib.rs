pub mod config;
pub mod domain {
    pub mod checkout;
    pub mod settings;
    pub mod status;
}
pub mod error;
pub mod http {
    pub mod extract;
    pub mod router;
    pub mod handlers {
        pub mod checkout;
        pub mod ops;
        pub mod payment_settings;
        pub mod root;
        pub mod status;
    }
    pub mod middleware {
        pub mod cors;
    }
}
pub mod repo;
pub mod service {
    pub mod checkout_service;
    pub mod settings_service;
    pub mod status_service;
}

use repo::{SettingsStore, StatusLog};
use service::checkout_service::CheckoutService;
use service::settings_service::SettingsService;
use service::status_service::StatusService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings_service: SettingsService,
    pub checkout_service: CheckoutService,
    pub status_service: StatusService,
}

impl AppState {
    pub fn new(
        settings_store: Arc<dyn SettingsStore>,
        status_log: Arc<dyn StatusLog>,
        status_list_limit: i64,
    ) -> Self {
        let settings_service = SettingsService::new(settings_store);
        Self {
            checkout_service: CheckoutService {
                settings: settings_service.clone(),
            },
            settings_service,
            status_service: StatusService {
                log: status_log,
                list_limit: status_list_limit,
            },
        }
    }
}
