use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use crate::features::admins::{dtos as admins_dtos, handlers::admin_handler};
use crate::features::auth::{self, dtos as auth_dtos, handlers::auth_handler};
use crate::features::bills::{dtos as bills_dtos, handlers::bill_handler};
use crate::features::buildings::{dtos as buildings_dtos, handlers::building_handler};
use crate::features::charges::{
    dtos as charges_dtos,
    handlers::{contribution_handler, service_charge_handler},
};
use crate::features::cylinders::{
    dtos as cylinders_dtos,
    handlers::{purchase_handler, usage_handler},
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::flats::{dtos as flats_dtos, handlers::flat_handler};
use crate::features::gas_usages::{dtos as gas_usages_dtos, handlers::gas_usage_handler};
use crate::features::residents::handlers as resident_handlers;
use crate::shared::batch::{BatchReport, BatchRequest};
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::period::Period;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handler::admin_sign_up,
        auth_handler::admin_sign_in,
        auth_handler::flat_sign_in,
        auth_handler::admin_sign_out,
        auth_handler::flat_sign_out,
        auth_handler::admin_auth_check,
        auth_handler::flat_auth_check,
        // Admins
        admin_handler::create_admin,
        admin_handler::list_admins,
        admin_handler::get_admin,
        admin_handler::delete_admin,
        // Buildings
        building_handler::create_building,
        building_handler::list_buildings,
        building_handler::get_building,
        building_handler::update_building,
        building_handler::delete_building,
        // Flats
        flat_handler::create_flat,
        flat_handler::list_flats,
        flat_handler::list_flats_by_building,
        flat_handler::get_flat,
        flat_handler::update_flat,
        flat_handler::delete_flat,
        // Bills
        bill_handler::create_bill,
        bill_handler::upload_bills,
        bill_handler::list_bills,
        bill_handler::list_flat_bills,
        bill_handler::flat_bill_remaining,
        bill_handler::update_bill,
        bill_handler::delete_bill,
        // Gas usages
        gas_usage_handler::create_gas_usage,
        gas_usage_handler::create_gas_usages,
        gas_usage_handler::list_building_gas_usages,
        gas_usage_handler::list_flat_gas_usages,
        gas_usage_handler::update_gas_usage,
        gas_usage_handler::delete_gas_usage,
        // Contributions
        contribution_handler::create_contribution,
        contribution_handler::create_contributions,
        contribution_handler::list_building_contributions,
        contribution_handler::list_flat_contributions,
        contribution_handler::update_contribution,
        contribution_handler::delete_contribution,
        // Service charges
        service_charge_handler::create_service_charge,
        service_charge_handler::create_service_charges,
        service_charge_handler::list_building_service_charges,
        service_charge_handler::list_flat_service_charges,
        service_charge_handler::update_service_charge,
        service_charge_handler::delete_service_charge,
        // Cylinders
        purchase_handler::create_purchase_log,
        purchase_handler::list_building_purchase_logs,
        purchase_handler::update_purchase_log,
        purchase_handler::delete_purchase_log,
        usage_handler::create_usage_log,
        usage_handler::list_building_usage_logs,
        usage_handler::update_usage_log,
        usage_handler::delete_usage_log,
        // Dashboard
        dashboard_handlers::monthly_building_summary,
        dashboard_handlers::monthly_flat_summary,
        dashboard_handlers::yearly_building_chart,
        dashboard_handlers::yearly_flat_chart,
        // Me
        resident_handlers::monthly_summary,
        resident_handlers::yearly_chart,
        resident_handlers::bills,
        resident_handlers::bills_remaining,
        resident_handlers::gas_usages,
        resident_handlers::contributions,
        resident_handlers::service_charges,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Period,
            BatchRequest,
            BatchReport,
            ApiResponse<BatchReport>,
            // Auth
            auth::model::SessionKind,
            auth::model::AdminIdentity,
            auth::model::ResidentIdentity,
            auth_dtos::AdminSignInDto,
            auth_dtos::FlatSignInDto,
            auth_dtos::SessionResponseDto,
            ApiResponse<auth_dtos::SessionResponseDto>,
            // Admins
            admins_dtos::CreateAdminDto,
            admins_dtos::AdminResponseDto,
            ApiResponse<admins_dtos::AdminResponseDto>,
            ApiResponse<Vec<admins_dtos::AdminResponseDto>>,
            // Buildings
            buildings_dtos::CreateBuildingDto,
            buildings_dtos::UpdateBuildingDto,
            buildings_dtos::BuildingResponseDto,
            ApiResponse<buildings_dtos::BuildingResponseDto>,
            ApiResponse<Vec<buildings_dtos::BuildingResponseDto>>,
            // Flats
            flats_dtos::CreateFlatDto,
            flats_dtos::UpdateFlatDto,
            flats_dtos::FlatResponseDto,
            ApiResponse<flats_dtos::FlatResponseDto>,
            ApiResponse<Vec<flats_dtos::FlatResponseDto>>,
            // Bills
            bills_dtos::CreateBillDto,
            bills_dtos::UpdateBillDto,
            bills_dtos::BillResponseDto,
            bills_dtos::BillRemainingDto,
            ApiResponse<bills_dtos::BillResponseDto>,
            ApiResponse<Vec<bills_dtos::BillResponseDto>>,
            ApiResponse<bills_dtos::BillRemainingDto>,
            // Gas usages
            gas_usages_dtos::CreateGasUsageDto,
            gas_usages_dtos::UpdateGasUsageDto,
            gas_usages_dtos::GasUsageResponseDto,
            ApiResponse<gas_usages_dtos::GasUsageResponseDto>,
            ApiResponse<Vec<gas_usages_dtos::GasUsageResponseDto>>,
            // Contributions and service charges
            charges_dtos::CreateChargeDto,
            charges_dtos::UpdateChargeDto,
            charges_dtos::ChargeResponseDto,
            ApiResponse<charges_dtos::ChargeResponseDto>,
            ApiResponse<Vec<charges_dtos::ChargeResponseDto>>,
            // Cylinders
            cylinders_dtos::CreatePurchaseLogDto,
            cylinders_dtos::UpdatePurchaseLogDto,
            cylinders_dtos::PurchaseLogResponseDto,
            cylinders_dtos::CreateUsageLogDto,
            cylinders_dtos::UpdateUsageLogDto,
            cylinders_dtos::UsageLogResponseDto,
            ApiResponse<cylinders_dtos::PurchaseLogResponseDto>,
            ApiResponse<Vec<cylinders_dtos::PurchaseLogResponseDto>>,
            ApiResponse<cylinders_dtos::UsageLogResponseDto>,
            ApiResponse<Vec<cylinders_dtos::UsageLogResponseDto>>,
            // Dashboard
            dashboard_dtos::CylinderPurchaseSummary,
            dashboard_dtos::CylinderUsageSummary,
            dashboard_dtos::MonthlyBuildingSummaryDto,
            dashboard_dtos::GasUsageSummary,
            dashboard_dtos::AmountSummary,
            dashboard_dtos::MonthlyFlatSummaryDto,
            dashboard_dtos::MonthValue,
            dashboard_dtos::YearlyBuildingChartDto,
            dashboard_dtos::YearlyFlatChartDto,
            ApiResponse<dashboard_dtos::MonthlyBuildingSummaryDto>,
            ApiResponse<dashboard_dtos::MonthlyFlatSummaryDto>,
            ApiResponse<dashboard_dtos::YearlyBuildingChartDto>,
            ApiResponse<dashboard_dtos::YearlyFlatChartDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin and flat resident sessions"),
        (name = "admins", description = "Admin account management"),
        (name = "buildings", description = "Residential buildings"),
        (name = "flats", description = "Flats and their owner/renter contacts"),
        (name = "bills", description = "Flat bills"),
        (name = "gas-usages", description = "Monthly gas meter ledger"),
        (name = "contributions", description = "Monthly mosque contributions"),
        (name = "service-charges", description = "Monthly service charges"),
        (name = "cylinder-purchases", description = "Building gas cylinder purchase logs"),
        (name = "cylinder-usages", description = "Building gas cylinder usage logs"),
        (name = "dashboard", description = "Admin summaries and yearly charts"),
        (name = "me", description = "Resident self-service, scoped to the signed-in flat"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Building Ledger API",
        version = "0.1.0",
        description = "API documentation for Building Ledger",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie and Bearer JWT security schemes to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_area() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/admin-sign-in",
            "/api/buildings/{id}",
            "/api/gas-usages/multiple",
            "/api/bills/flat/remaining/{flat_id}",
            "/api/cylinder-uls/building/{building_id}",
            "/api/dash/yearly-flat-chart-data/{flat_id}",
            "/api/me/service-charges",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("cookie_auth"));
        assert!(schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Ledger".to_string(),
            version: "9.9.9".to_string(),
            description: "patched".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Ledger");
        assert_eq!(doc.info.description.as_deref(), Some("patched"));
    }
}
