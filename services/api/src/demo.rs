use crate::infra::{default_cod_settings, InMemoryCodLedger, InMemorySettingsStore};
use chrono::{Local, NaiveDateTime, Utc};
use clap::Args;
use std::sync::Arc;
use storefront::checkout::cod::{
    CartLine, CartSnapshot, CheckoutCodService, CodDecision, DeliveryAddress,
};
use storefront::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Cart subtotal to evaluate
    #[arg(long, default_value_t = 500.0)]
    pub(crate) subtotal: f64,
    /// Delivery pincode
    #[arg(long, default_value = "560001")]
    pub(crate) pincode: String,
    /// Delivery state
    #[arg(long, default_value = "Karnataka")]
    pub(crate) state: String,
    /// Delivery city
    #[arg(long, default_value = "Bengaluru")]
    pub(crate) city: String,
    /// Courier code selected at checkout
    #[arg(long)]
    pub(crate) courier: Option<String>,
    /// Order time (YYYY-MM-DDTHH:MM). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_order_time)]
    pub(crate) order_time: Option<NaiveDateTime>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        subtotal,
        pincode,
        state,
        city,
        courier,
        order_time,
    } = args;

    let store = Arc::new(InMemorySettingsStore::with_document(default_cod_settings()));
    let ledger = Arc::new(InMemoryCodLedger::default());
    let service = CheckoutCodService::new(store, ledger);

    let cart = CartSnapshot::new(vec![CartLine {
        product_id: "demo-item".to_string(),
        category_id: None,
        quantity: 1,
        unit_price: subtotal,
    }]);
    let address = DeliveryAddress {
        pincode,
        state,
        city,
    };
    let order_time = order_time.unwrap_or_else(|| Local::now().naive_local());

    println!("COD check for subtotal {subtotal:.2} to {}", address.pincode);
    let decision = service.check(&cart, &address, courier.as_deref(), order_time)?;

    match &decision {
        CodDecision::Available { charge } => {
            println!("  available, charge {charge:.2}");
            service.record_cod_order("demo-order", *charge, Utc::now())?;
            let analytics = service.analytics()?;
            println!(
                "  recorded demo order; ledger now holds {} order(s), revenue {:.2}",
                analytics.total_cod_orders, analytics.total_cod_revenue
            );
        }
        CodDecision::Unavailable { reason } => {
            println!("  unavailable: {}", reason.summary());
        }
    }

    Ok(())
}
