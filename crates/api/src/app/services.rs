//! Infrastructure wiring: stores, codec, engine, and the domain services.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use memberbase_auth::{
    ClaimsInspector, EntitlementEngine, MemberDirectory, SecurityConfig, TokenCodec,
};
use memberbase_comm::{CommunicationConfig, CommunicationService, StageTemplateProvider};
use memberbase_core::EmailAddress;
use memberbase_events::{EventService, NewsConfig, NewsService};
use memberbase_infra::{InMemoryEventStore, InMemoryMemberStore, InMemoryNewsStore, TracingMailer};
use memberbase_members::{
    AdminConfig, AdminService, LoginService, Member, MemberRepository, NewMember, PasswordHash,
    PortfolioService, RegistrationService, TokenService,
};

/// Process configuration, assembled once in `main` (or a test harness).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub news: NewsConfig,
    pub comm: CommunicationConfig,

    /// Optional seed admin, the in-memory stand-in for a provisioning
    /// script. Without one, a fresh store has nobody who can confirm
    /// registrations.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            security: SecurityConfig::new(jwt_secret, super::default_security_rules()),
            admin: AdminConfig::default(),
            news: NewsConfig::default(),
            comm: CommunicationConfig::default(),
            bootstrap_admin: None,
        }
    }
}

pub struct AppServices {
    pub inspector: ClaimsInspector,
    pub members: Arc<InMemoryMemberStore>,
    pub tokens: Arc<TokenService>,
    pub registration: RegistrationService,
    pub login: LoginService,
    pub admin: AdminService,
    pub portfolio: PortfolioService,
    pub events: EventService,
    pub news: NewsService,
}

pub async fn build_services(config: &AppConfig) -> AppServices {
    let codec = Arc::new(TokenCodec::new(config.security.secret.as_bytes()));
    let inspector = ClaimsInspector::new(Arc::clone(&codec));

    let members = Arc::new(InMemoryMemberStore::new());
    let event_store = Arc::new(InMemoryEventStore::new());
    let news_store = Arc::new(InMemoryNewsStore::new());

    let engine = Arc::new(EntitlementEngine::with_default_checks(
        Arc::clone(&members) as Arc<dyn MemberDirectory>,
    ));

    let comm = Arc::new(CommunicationService::new(
        vec![Arc::new(StageTemplateProvider::new(config.comm.clone()))],
        Arc::new(TracingMailer::new()),
    ));

    let tokens = Arc::new(TokenService::new(
        Arc::clone(&codec),
        Arc::clone(&members) as _,
        config.security.token_ttl(),
    ));

    if let Some(bootstrap) = &config.bootstrap_admin {
        seed_admin(&members, bootstrap).await;
    }

    AppServices {
        inspector,
        tokens: Arc::clone(&tokens),
        registration: RegistrationService::new(Arc::clone(&members) as _),
        login: LoginService::new(Arc::clone(&members) as _, tokens),
        admin: AdminService::new(
            Arc::clone(&members) as _,
            Arc::clone(&engine),
            comm,
            config.admin.clone(),
        ),
        portfolio: PortfolioService::new(Arc::clone(&members) as _, Arc::clone(&engine)),
        events: EventService::new(event_store, Arc::clone(&engine)),
        news: NewsService::new(news_store, engine, config.news.clone()),
        members,
    }
}

async fn seed_admin(members: &Arc<InMemoryMemberStore>, bootstrap: &BootstrapAdmin) {
    let Ok(email) = EmailAddress::parse(&bootstrap.email) else {
        tracing::error!(email = %bootstrap.email, "bootstrap admin email invalid; skipping seed");
        return;
    };
    let Ok(password) = PasswordHash::from_plain(&bootstrap.password) else {
        tracing::error!("bootstrap admin password rejected; skipping seed");
        return;
    };

    let now = Utc::now();
    let mut admin = Member::register(
        NewMember {
            first_name: bootstrap.first_name.clone(),
            last_name: bootstrap.last_name.clone(),
            email,
            password,
            date_of_birth: NaiveDate::default(),
        },
        now,
    );
    if admin.confirm(now).is_err() {
        tracing::error!("bootstrap admin could not be confirmed");
        return;
    }
    admin.add_role(memberbase_auth::Role::Admin, now);

    match members.save(admin).await {
        Ok(admin) => tracing::info!(admin = %admin.id, "bootstrap admin seeded"),
        Err(err) => tracing::error!(error = %err, "failed to seed bootstrap admin"),
    }
}
