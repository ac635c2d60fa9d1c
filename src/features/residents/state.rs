use std::sync::Arc;

use crate::features::bills::BillService;
use crate::features::charges::ChargeService;
use crate::features::dashboard::DashboardService;
use crate::features::gas_usages::GasUsageService;

/// The services behind `/api/me`
pub struct ResidentServices {
    pub dashboard: Arc<DashboardService>,
    pub bills: Arc<BillService>,
    pub gas_usages: Arc<GasUsageService>,
    pub contributions: Arc<ChargeService>,
    pub service_charges: Arc<ChargeService>,
}
