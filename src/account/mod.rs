//! 로컬 계정과 현재 세션.
//!
//! 비밀번호는 평문 비교만 한다. 세션 사용자는 `user` 키에 비밀번호 없이 저장된다.

// region:    --- Imports
use crate::clock::Clock;
use crate::error::{Result, TenderError};
use crate::repository::generate_id;
use crate::store::{self, KeyValueStore, CURRENT_USER_KEY, USERS_KEY};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Modules
pub mod demo;
pub mod model;

pub use model::{Credentials, ProfileUpdate, Registration, Role, SessionUser, UserRecord};
// endregion: --- Modules

// region:    --- Account Service
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    users_lock: Mutex<()>,
}

impl AccountService {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            users_lock: Mutex::new(()),
        }
    }

    /// 회원 가입 후 바로 로그인 상태가 된다
    pub async fn register(&self, registration: Registration) -> Result<SessionUser> {
        info!("{:<12} --> 회원 가입 요청: {}", "Account", registration.email);
        let email = registration.email.trim().to_lowercase();
        if registration.name.trim().is_empty() || email.is_empty() {
            return Err(TenderError::Validation("name and email are required".to_string()));
        }
        if registration.password.is_empty() {
            return Err(TenderError::Validation("password is required".to_string()));
        }

        let _guard = self.users_lock.lock().await;
        let mut users = self.users().await?;
        if users.iter().any(|user| user.email.eq_ignore_ascii_case(&email)) {
            warn!("{:<12} --> 이미 등록된 이메일: {}", "Account", email);
            return Err(TenderError::Validation("email already registered".to_string()));
        }

        let record = UserRecord {
            id: generate_id("user"),
            name: registration.name.trim().to_string(),
            email,
            password: registration.password,
            role: registration.role,
            is_admin: registration.role == Role::Admin,
            company_name: registration.company_name,
            created_at: self.clock.now(),
            updated_at: None,
        };
        let session = SessionUser::from(&record);
        users.push(record);
        store::set_json(&*self.store, USERS_KEY, &users).await?;
        store::set_json(&*self.store, CURRENT_USER_KEY, &session).await?;
        Ok(session)
    }

    /// 로그인 (평문 비밀번호 비교)
    pub async fn login(&self, credentials: Credentials) -> Result<SessionUser> {
        info!("{:<12} --> 로그인 요청: {}", "Account", credentials.email);
        let users = self.users().await?;
        let record = users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(credentials.email.trim()))
            .filter(|user| user.password == credentials.password)
            .ok_or_else(|| TenderError::Unauthorized("invalid email or password".to_string()))?;

        let session = SessionUser::from(record);
        store::set_json(&*self.store, CURRENT_USER_KEY, &session).await?;
        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        info!("{:<12} --> 로그아웃", "Account");
        self.store.remove(CURRENT_USER_KEY).await
    }

    pub async fn current_user(&self) -> Result<Option<SessionUser>> {
        store::get_json(&*self.store, CURRENT_USER_KEY).await
    }

    /// 현재 사용자 프로필 수정. 기존 입찰의 입찰자 정보는 바뀌지 않는다
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<SessionUser> {
        let current = self
            .current_user()
            .await?
            .ok_or_else(|| TenderError::Unauthorized("no user is logged in".to_string()))?;

        let _guard = self.users_lock.lock().await;
        let mut users = self.users().await?;
        let record = users
            .iter_mut()
            .find(|user| user.id == current.id)
            .ok_or_else(|| TenderError::not_found("user", &current.id))?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(company_name) = update.company_name {
            record.company_name = Some(company_name);
        }
        record.updated_at = Some(self.clock.now());
        let session = SessionUser::from(&*record);

        store::set_json(&*self.store, USERS_KEY, &users).await?;
        store::set_json(&*self.store, CURRENT_USER_KEY, &session).await?;
        Ok(session)
    }

    async fn users(&self) -> Result<Vec<UserRecord>> {
        Ok(store::get_json(&*self.store, USERS_KEY)
            .await?
            .unwrap_or_default())
    }
}
// endregion: --- Account Service
