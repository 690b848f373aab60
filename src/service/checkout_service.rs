use crate::domain::checkout::{dispatch, order_amount, CheckoutMethod, CheckoutRequest, CheckoutSessionResponse};
use crate::error::AppError;
use crate::service::settings_service::SettingsService;

#[derive(Clone)]
pub struct CheckoutService {
    pub settings: SettingsService,
}

impl CheckoutService {
    pub async fn create_session(&self, req: CheckoutRequest) -> Result<CheckoutSessionResponse, AppError> {
        req.validate()?;

        let amount = order_amount(&req.items)?;
        let currency = req.currency();
        let method = CheckoutMethod::parse(&req.method)?;
        let settings = match method {
            CheckoutMethod::CashOnDelivery => None,
            CheckoutMethod::Gateway(_) => Some(self.settings.get().await?),
        };

        let resp = dispatch(method, amount, currency, settings.as_ref());
        tracing::debug!(
            method = %resp.method,
            status = ?resp.status,
            amount = resp.amount,
            items = req.items.len(),
            "checkout session resolved"
        );
        Ok(resp)
    }
}
