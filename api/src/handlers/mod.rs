//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use chrono::{DateTime, Utc};

use crate::error::AppError;

pub mod accessories;
pub mod accounts;
pub mod analyze;
pub mod company;
pub mod entry_equipment;
pub mod equip;
pub mod equip_type;
pub mod part;
pub mod process;

pub use accessories::{add_accessory, list_accessories};
pub use accounts::{
    add_type_account, add_user, get_type_account_resources, list_type_accounts, login, logout,
};
pub use analyze::{add_analysis, get_analysis};
pub use company::{add_company, get_company, list_companies};
pub use entry_equipment::{add_entry, list_entries};
pub use equip::{add_equip, get_equip_by_serial, list_equips, update_equip};
pub use equip_type::{
    add_equip_type, add_mark, add_model, list_equip_types, list_marks_by_type,
    list_models_by_mark,
};
pub use part::{add_part, list_parts, update_cost_price, update_sale_price};
pub use process::{advance_process, list_process};

/// JSON request body whose rejection answers with the API's own `400` body
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Listing timestamp, `DD/MM/YYYY HH:MM`
pub(crate) fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_use_day_first() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_date(&at), "07/03/2024 09:05");
    }
}
