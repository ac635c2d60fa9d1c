use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admins::dtos::CreateAdminDto;
use crate::features::admins::models::Admin;
use crate::features::admins::AdminService;
use crate::features::auth::cookie::session_cookie;
use crate::features::auth::dtos::{AdminSignInDto, FlatSignInDto};
use crate::features::auth::model::{
    AdminIdentity, Claims, Principal, ResidentIdentity, SessionKind,
};
use crate::features::auth::services::password;
use crate::features::auth::services::{IssuedToken, TokenService};
use crate::features::flats::models::Flat;
use crate::features::flats::FlatService;
use axum_extra::extract::cookie::Cookie;

/// A signed-in principal together with its fresh session
pub struct Session {
    pub principal: Principal,
    pub token: IssuedToken,
}

pub struct AuthService {
    admins: Arc<AdminService>,
    flats: Arc<FlatService>,
    tokens: Arc<TokenService>,
    secure_cookie: bool,
}

impl AuthService {
    pub fn new(
        admins: Arc<AdminService>,
        flats: Arc<FlatService>,
        tokens: Arc<TokenService>,
        secure_cookie: bool,
    ) -> Self {
        Self {
            admins,
            flats,
            tokens,
            secure_cookie,
        }
    }

    /// Bootstrap sign-up; only allowed while no admin exists.
    pub async fn admin_sign_up(&self, dto: CreateAdminDto) -> Result<Session> {
        let created = self.admins.create_first(dto).await?;
        let principal = Principal::Admin(AdminIdentity {
            id: created.id,
            username: created.username,
            email: created.email,
        });
        self.start(principal)
    }

    pub async fn admin_sign_in(&self, dto: AdminSignInDto) -> Result<Session> {
        let admin = self.admins.find_by_email(&dto.email).await?.ok_or_else(|| {
            AppError::NotFound("Couldn't find any admin with this email".to_string())
        })?;

        if !password::verify_password(&dto.password, &admin.password_hash)? {
            tracing::warn!(admin_id = %admin.id, "Admin sign-in with wrong password");
            return Err(AppError::Auth("The password is invalid".to_string()));
        }

        tracing::info!(admin_id = %admin.id, "Admin signed in");
        self.start(admin_principal(admin))
    }

    pub async fn flat_sign_in(&self, dto: FlatSignInDto) -> Result<Session> {
        let flat = self
            .flats
            .find_by_credentials(&dto.flat_number, &dto.phone)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Couldn't find any flat resident with these credentials".to_string(),
                )
            })?;

        tracing::info!(flat_id = %flat.id, "Flat resident signed in");
        self.start(resident_principal(flat))
    }

    /// Verify a raw token and load the record it names.
    pub async fn authenticate(&self, token: &str) -> Result<Principal> {
        let claims = self.tokens.verify(token)?;
        self.resolve(&claims).await
    }

    /// A verified token whose record no longer exists is rejected.
    pub async fn resolve(&self, claims: &Claims) -> Result<Principal> {
        let principal = match claims.kind {
            SessionKind::Admin => self.admins.find_by_id(claims.sub).await?.map(admin_principal),
            SessionKind::Flat => self.flats.find_by_id(claims.sub).await?.map(resident_principal),
        };

        principal.ok_or_else(|| AppError::Unauthorized("Session is no longer valid".to_string()))
    }

    pub fn cookie(&self, token: &IssuedToken) -> Cookie<'static> {
        session_cookie(token.token.clone(), self.tokens.ttl(), self.secure_cookie)
    }

    fn start(&self, principal: Principal) -> Result<Session> {
        let subject = match &principal {
            Principal::Admin(admin) => admin.id,
            Principal::Resident(resident) => resident.flat_id,
        };
        let token = self.tokens.issue(subject, principal.kind())?;
        Ok(Session { principal, token })
    }
}

fn admin_principal(admin: Admin) -> Principal {
    Principal::Admin(AdminIdentity {
        id: admin.id,
        username: admin.username,
        email: admin.email,
    })
}

fn resident_principal(flat: Flat) -> Principal {
    Principal::Resident(ResidentIdentity {
        flat_id: flat.id,
        building_id: flat.building_id,
        flat_number: flat.flat_number,
    })
}
