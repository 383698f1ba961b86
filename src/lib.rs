pub mod catalog;
pub mod config;
pub mod domain {
    pub mod fees;
    pub mod profile;
    pub mod provider;
    pub mod recommendation;
    pub mod weights;
}
pub mod engine;
pub mod http {
    pub mod handlers {
        pub mod compare;
        pub mod ops;
        pub mod providers;
        pub mod recommendations;
        pub mod scoring_debug;
        pub mod weights;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
}
pub mod repo {
    pub mod providers_repo;
    pub mod runs_repo;
    pub mod weights_repo;
}
pub mod service {
    pub mod advisor_service;
    pub mod config_cache;
}

#[derive(Clone)]
pub struct AppState {
    pub advisor_service: service::advisor_service::AdvisorService,
    pub providers_repo: repo::providers_repo::ProvidersRepo,
    pub weights_repo: repo::weights_repo::WeightsRepo,
    pub fixture: catalog::fixture::FixtureCatalog,
    pub pool: sqlx::PgPool,
}
